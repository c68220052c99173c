use crate::domain::payment_request::PaymentRequest;
use crate::error::{Result, UpiError};
use std::io::Read;

/// Reads payment requests from a CSV source with the header
/// `amount,note,payee_name,payee_address`.
///
/// Whitespace around fields is trimmed and short records are tolerated by the
/// reader; a record missing a column fails to deserialize on its own.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one request per record.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(UpiError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "amount, note, payee_name, payee_address\n\
                    100.00, Lunch, Alice, alice@bank\n\
                    5, , Bob, bob@upi";
        let results: Vec<Result<PaymentRequest>> = RequestReader::new(data.as_bytes())
            .requests()
            .collect();

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &PaymentRequest::new("100.00", "Lunch", "Alice", "alice@bank")
        );
        assert_eq!(results[1].as_ref().unwrap().note, "");
    }

    #[test]
    fn test_reader_short_record() {
        let data = "amount, note, payee_name, payee_address\n1.0, rent";
        let results: Vec<Result<PaymentRequest>> = RequestReader::new(data.as_bytes())
            .requests()
            .collect();

        assert!(matches!(results[0], Err(UpiError::Csv(_))));
    }
}
