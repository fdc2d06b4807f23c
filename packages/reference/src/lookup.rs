//! The lookup interface consumed by the address converter.

/// Name-to-code lookups over the county / town / land-section hierarchy.
///
/// Implementations are populated once and read-only afterwards, so a single
/// instance can be shared across threads without locking.
pub trait ReferenceLookup: Send + Sync {
    /// County code for a county name (e.g. "臺中市" -> "B").
    fn lookup_county_code(&self, name: &str) -> Option<&str>;

    /// Town code for a town name, regardless of county.
    ///
    /// Town names are not unique nationwide; for a name registered under
    /// several counties an implementation returns one deterministic choice.
    fn lookup_town_code(&self, name: &str) -> Option<&str>;

    /// County code owning a town code.
    fn lookup_county_code_by_town_code(&self, town_code: &str) -> Option<&str>;

    /// Section code for a section name within one town.
    fn lookup_section_code(
        &self,
        county_code: &str,
        town_code: &str,
        section_name: &str,
    ) -> Option<&str>;

    /// All county names, in registration order.
    fn all_county_names(&self) -> Vec<String>;

    /// All town names, in registration order, without duplicates.
    fn all_town_names(&self) -> Vec<String>;

    /// Town code for a town name within a known county.
    fn lookup_town_code_in_county(&self, _county_code: &str, name: &str) -> Option<&str> {
        self.lookup_town_code(name)
    }

    /// Whether a town name is registered under more than one county.
    fn is_ambiguous_town(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A lookup knowing one town and relying on the default methods.
    struct SingleTown;

    impl ReferenceLookup for SingleTown {
        fn lookup_county_code(&self, _name: &str) -> Option<&str> {
            None
        }

        fn lookup_town_code(&self, name: &str) -> Option<&str> {
            (name == "烏日區").then_some("B13")
        }

        fn lookup_county_code_by_town_code(&self, _town_code: &str) -> Option<&str> {
            None
        }

        fn lookup_section_code(&self, _county: &str, _town: &str, _section: &str) -> Option<&str> {
            None
        }

        fn all_county_names(&self) -> Vec<String> {
            Vec::new()
        }

        fn all_town_names(&self) -> Vec<String> {
            vec!["烏日區".to_string()]
        }
    }

    #[test]
    fn test_scoped_lookup_defaults_to_global() {
        assert_eq!(SingleTown.lookup_town_code_in_county("D", "烏日區"), Some("B13"));
        assert_eq!(SingleTown.lookup_town_code_in_county("B", "東區"), None);
    }

    #[test]
    fn test_no_town_is_ambiguous_by_default() {
        assert!(!SingleTown.is_ambiguous_town("烏日區"));
    }
}
