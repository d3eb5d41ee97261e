use std::collections::HashMap;

/// Deprecated locale-suffixed paths and the canonical locale-prefixed paths that replaced
/// them. Lookups are exact; matches are answered with a permanent redirect.
#[derive(Debug, Clone, Default)]
pub struct LegacyRedirects {
    targets: HashMap<String, String>,
}

impl LegacyRedirects {
    pub fn standard() -> Self {
        Self::from_pairs([
            ("/traslado/en", "/en/traslado"),
            ("/traslado/fr", "/fr/traslado"),
        ])
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            targets: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    pub fn redirect_for(&self, legacy_path: &str) -> Option<&str> {
        self.targets.get(legacy_path).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_transfer_paths_map_to_prefixed_routes() {
        let redirects = LegacyRedirects::standard();
        assert_eq!(redirects.redirect_for("/traslado/en"), Some("/en/traslado"));
        assert_eq!(redirects.redirect_for("/traslado/fr"), Some("/fr/traslado"));
    }

    #[test]
    fn lookup_is_exact() {
        let redirects = LegacyRedirects::standard();
        assert_eq!(redirects.redirect_for("/traslado/en/"), None);
        assert_eq!(redirects.redirect_for("/traslado/EN"), None);
        assert_eq!(redirects.redirect_for("/traslado"), None);
    }
}
