use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use upi_dispatch::domain::payment_request::PaymentRequest;

const SPECIAL: &[char] = &[
    ' ', '@', '&', '=', '?', '#', '%', '+', '/', '\'', '"', ',', '.', '-', '_', '~', 'é', '₹',
];

/// A random field mixing alphanumerics with characters that need escaping.
pub fn random_field<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(0..24);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.3) {
                *SPECIAL.choose(rng).unwrap_or(&' ')
            } else {
                rng.sample(Alphanumeric) as char
            }
        })
        .collect()
}

pub fn random_request<R: Rng>(rng: &mut R) -> PaymentRequest {
    PaymentRequest::new(
        random_field(rng),
        random_field(rng),
        random_field(rng),
        random_field(rng),
    )
}
