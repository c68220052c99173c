use crate::domain::payment_request::PaymentRequest;
use crate::error::Result;
use std::io::Write;

/// Writes `payee_address,uri` rows for built pay links.
pub struct LinkWriter<W: Write> {
    writer: csv::Writer<W>,
    wrote_header: bool,
}

impl<W: Write> LinkWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            wrote_header: false,
        }
    }

    pub fn write_link(&mut self, request: &PaymentRequest) -> Result<()> {
        if !self.wrote_header {
            self.writer.write_record(["payee_address", "uri"])?;
            self.wrote_header = true;
        }
        let uri = request.to_uri()?;
        self.writer
            .write_record([request.payee_address.as_str(), uri.as_str()])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_once() {
        let mut buffer = Vec::new();
        {
            let mut writer = LinkWriter::new(&mut buffer);
            writer
                .write_link(&PaymentRequest::new("100.00", "Lunch", "Alice", "alice@bank"))
                .unwrap();
            writer
                .write_link(&PaymentRequest::new("1", "", "", "b@c"))
                .unwrap();
            writer.flush().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "payee_address,uri\n\
             alice@bank,upi://pay?pa=alice%40bank&pn=Alice&tn=Lunch&am=100.00&cu=INR\n\
             b@c,upi://pay?pa=b%40c&pn=&tn=&am=1&cu=INR\n"
        );
    }
}
