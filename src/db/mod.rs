//! Internal database API exposing read-only views over element reference data.
//!
//! The element table (atomic number, standard mass, covalent radius) is embedded
//! at compile time and parsed once on first access. Atom construction and bond
//! guessing resolve chemical types against it by exact symbol match.

mod loader;
mod schema;
mod store;

/// Retrieves the reference data for an element by its symbol.
///
/// # Arguments
///
/// * `symbol` - Case-sensitive element symbol such as `"H"` or `"Fe"`.
///
/// # Returns
///
/// `Some(ElementView)` when the symbol is known, otherwise `None`.
pub fn get_element(symbol: &str) -> Option<ElementView<'static>> {
    store::get_store()
        .elements_by_symbol
        .get(symbol)
        .map(ElementView::new)
}

/// Lightweight wrapper granting read-only access to a stored element record.
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a> {
    inner: &'a schema::ElementRecord,
}

impl<'a> ElementView<'a> {
    fn new(inner: &'a schema::ElementRecord) -> Self {
        Self { inner }
    }

    /// Returns the element symbol as stored in the table.
    pub fn symbol(&self) -> &'a str {
        &self.inner.symbol
    }

    /// Returns the atomic number.
    pub fn number(&self) -> u8 {
        self.inner.number
    }

    /// Returns the standard atomic mass in unified atomic mass units.
    pub fn mass(&self) -> f64 {
        self.inner.mass
    }

    /// Returns the covalent radius in ångströms, when tabulated.
    pub fn covalent_radius(&self) -> Option<f64> {
        self.inner.covalent_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_element_resolves_known_symbols() {
        let hydrogen = get_element("H").expect("hydrogen should be tabulated");
        assert_eq!(hydrogen.symbol(), "H");
        assert_eq!(hydrogen.number(), 1);
        assert!((hydrogen.mass() - 1.00794).abs() < 1e-10);
        assert_eq!(hydrogen.covalent_radius(), Some(0.31));

        let iron = get_element("Fe").expect("iron should be tabulated");
        assert_eq!(iron.number(), 26);
        assert_eq!(iron.covalent_radius(), Some(1.32));
    }

    #[test]
    fn get_element_is_case_sensitive() {
        assert!(get_element("h").is_none());
        assert!(get_element("FE").is_none());
    }

    #[test]
    fn get_element_rejects_unknown_symbols() {
        assert!(get_element("Xx").is_none());
        assert!(get_element("").is_none());
        assert!(get_element("Ow").is_none());
    }

    #[test]
    fn heavy_actinides_have_no_covalent_radius() {
        let lawrencium = get_element("Lr").expect("lawrencium should be tabulated");
        assert_eq!(lawrencium.covalent_radius(), None);
    }
}
