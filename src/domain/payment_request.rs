use crate::error::{Result, UpiError};
use serde::{Deserialize, Serialize};
use url::Url;

pub const UPI_SCHEME: &str = "upi";
pub const UPI_PAY_HOST: &str = "pay";
/// The only currency a UPI pay link is ever built with.
pub const CURRENCY: &str = "INR";

/// A single payment to hand to a UPI application.
///
/// All fields are taken verbatim from the caller. Nothing here checks that
/// `amount` is numeric or that `payee_address` looks like a VPA; upstream code
/// owns that.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: String,
    pub note: String,
    pub payee_name: String,
    pub payee_address: String,
}

impl PaymentRequest {
    pub fn new(
        amount: impl Into<String>,
        note: impl Into<String>,
        payee_name: impl Into<String>,
        payee_address: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            note: note.into(),
            payee_name: payee_name.into(),
            payee_address: payee_address.into(),
        }
    }

    /// Builds the `upi://pay` deep link.
    ///
    /// Parameters are emitted as `pa`, `pn`, `tn`, `am`, `cu`, in that order,
    /// with every value percent-encoded (RFC 3986 unreserved characters stay
    /// literal).
    pub fn to_uri(&self) -> Result<Url> {
        let params = [
            ("pa", self.payee_address.as_str()),
            ("pn", self.payee_name.as_str()),
            ("tn", self.note.as_str()),
            ("am", self.amount.as_str()),
            ("cu", CURRENCY),
        ];
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut uri = Url::parse(&format!("{UPI_SCHEME}://{UPI_PAY_HOST}"))?;
        uri.set_query(Some(&query));
        Ok(uri)
    }

    /// Recovers the request carried by a `upi://pay` link.
    ///
    /// Absent `pa`/`pn`/`tn`/`am` parameters decode as empty strings. The
    /// currency must be present and equal to [`CURRENCY`].
    pub fn from_uri(uri: &Url) -> Result<Self> {
        if uri.scheme() != UPI_SCHEME {
            return Err(UpiError::InvalidUri(format!(
                "expected scheme '{UPI_SCHEME}', got '{}'",
                uri.scheme()
            )));
        }
        if uri.host_str() != Some(UPI_PAY_HOST) {
            return Err(UpiError::InvalidUri(format!(
                "expected '{UPI_SCHEME}://{UPI_PAY_HOST}', got '{uri}'"
            )));
        }

        let (mut payee_address, mut payee_name, mut note, mut amount, mut currency) =
            (None, None, None, None, None);
        for (key, value) in query_params(uri.query().unwrap_or_default())? {
            // The first occurrence of a key wins.
            let slot = match key.as_str() {
                "pa" => &mut payee_address,
                "pn" => &mut payee_name,
                "tn" => &mut note,
                "am" => &mut amount,
                "cu" => &mut currency,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        let request = Self {
            amount: amount.unwrap_or_default(),
            note: note.unwrap_or_default(),
            payee_name: payee_name.unwrap_or_default(),
            payee_address: payee_address.unwrap_or_default(),
        };
        match currency.as_deref() {
            Some(CURRENCY) => Ok(request),
            Some(other) => Err(UpiError::InvalidUri(format!(
                "unsupported currency '{other}'"
            ))),
            None => Err(UpiError::InvalidUri("missing currency".to_string())),
        }
    }
}

/// Splits a raw query string into percent-decoded key/value pairs.
///
/// `+` is kept literal; UPI links are not form-encoded.
pub(crate) fn query_params(query: &str) -> Result<Vec<(String, String)>> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |raw: &str| {
                urlencoding::decode(raw)
                    .map(|decoded| decoded.into_owned())
                    .map_err(|e| UpiError::InvalidUri(format!("bad percent-encoding: {e}")))
            };
            Ok((decode(key)?, decode(value)?))
        })
        .collect()
}
