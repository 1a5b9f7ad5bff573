//! Card instance key derivation.
//!
//! The key is the SHA-256 of the route-equivalent string
//! `/{pack}/{card}[?{query}]`, where the query is form-encoded from the
//! parameters sorted by name (then by value, so repeated names are stable
//! too). Identical inputs always produce the identical key, whatever order
//! the parameters arrived in.

use sha2::{Digest, Sha256};
use shared_types::CardInstanceKey;

/// Derives stable instance keys. Pure; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive the instance key for `(pack, card, params)`.
    pub fn derive<I, K, V>(pack: &str, card: &str, params: I) -> CardInstanceKey
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = Self::route(pack, card, params);
        let digest = Sha256::digest(route.as_bytes());
        CardInstanceKey::from_raw(hex::encode(digest))
    }

    /// The normalized route string that is hashed into the key.
    pub fn route<I, K, V>(pack: &str, card: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = normalized_query(params);
        if query.is_empty() {
            format!("/{}/{}", pack, card)
        } else {
            format!("/{}/{}?{}", pack, card, query)
        }
    }
}

/// Form-encode parameters in canonical order.
pub fn normalized_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = params.into_iter().collect();
    pairs.sort_by(|a, b| {
        a.0.as_ref()
            .cmp(b.0.as_ref())
            .then_with(|| a.1.as_ref().cmp(b.1.as_ref()))
    });

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}
