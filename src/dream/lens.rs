/// One of the four fixed interpretive methodologies applied to a narrative.
///
/// The set is closed: interpretation records are validated structurally
/// against these lenses rather than by matching free-form keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lens {
    Freudien,
    Symbolique,
    CognitivoScientifique,
    Emotionnelle,
}

impl Lens {
    /// All lenses, in the order their keys appear in a serialized record.
    pub const ALL: [Lens; 4] = [
        Lens::Freudien,
        Lens::Symbolique,
        Lens::CognitivoScientifique,
        Lens::Emotionnelle,
    ];

    /// JSON key used for this lens in an interpretation record.
    pub fn key(&self) -> &'static str {
        match self {
            Lens::Freudien => "Freudien",
            Lens::Symbolique => "Symbolique",
            Lens::CognitivoScientifique => "Cognitivo-scientifique",
            Lens::Emotionnelle => "Émotionnelle",
        }
    }
}

impl std::fmt::Display for Lens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lens_order_matches_record_key_order() {
        let keys: Vec<&str> = Lens::ALL.iter().map(|l| l.key()).collect();
        assert_eq!(
            keys,
            [
                "Freudien",
                "Symbolique",
                "Cognitivo-scientifique",
                "Émotionnelle"
            ]
        );
    }
}
