//! Filter field identities.
//!
//! The form recognizes a closed set of filter fields; every binding, option
//! set, validation entry, and request value is keyed by `FieldName`.

/// One named filter input that narrows a rate card query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    XbService,
    SalesChannel,
    OriginCountry,
    DestinationCountry,
    BusinessModel,
    FreightMode,
    Cod,
    LmRateTier,
    CodRateTier,
    E2eRateTier,
    LmSolution,
    QuoteDate,
}

impl FieldName {
    /// Every recognized filter field, in request order.
    pub const ALL: [FieldName; 12] = [
        FieldName::XbService,
        FieldName::SalesChannel,
        FieldName::OriginCountry,
        FieldName::DestinationCountry,
        FieldName::BusinessModel,
        FieldName::FreightMode,
        FieldName::Cod,
        FieldName::LmRateTier,
        FieldName::CodRateTier,
        FieldName::E2eRateTier,
        FieldName::LmSolution,
        FieldName::QuoteDate,
    ];

    /// Fields overwritten by a quote record load.
    pub const RECORD_SOURCED: [FieldName; 10] = [
        FieldName::XbService,
        FieldName::SalesChannel,
        FieldName::OriginCountry,
        FieldName::DestinationCountry,
        FieldName::BusinessModel,
        FieldName::FreightMode,
        FieldName::Cod,
        FieldName::LmRateTier,
        FieldName::CodRateTier,
        FieldName::E2eRateTier,
    ];

    /// Fields the user fills in (or overrides) before submitting. These are
    /// the required set for validation by default.
    pub const DEFAULT_REQUIRED: [FieldName; 5] = [
        FieldName::E2eRateTier,
        FieldName::CodRateTier,
        FieldName::LmRateTier,
        FieldName::LmSolution,
        FieldName::QuoteDate,
    ];

    /// The two upstream fields the LM solution option set depends on.
    pub const SOLUTION_UPSTREAMS: [FieldName; 2] =
        [FieldName::XbService, FieldName::DestinationCountry];

    /// Name used by edit events and `--set name=value` arguments.
    pub fn input_name(&self) -> &'static str {
        match self {
            FieldName::XbService => "xbService",
            FieldName::SalesChannel => "salesChannel",
            FieldName::OriginCountry => "originCountry",
            FieldName::DestinationCountry => "destinationCountry",
            FieldName::BusinessModel => "b2bB2c",
            FieldName::FreightMode => "freightMode",
            FieldName::Cod => "cod",
            FieldName::LmRateTier => "lmRateTier",
            FieldName::CodRateTier => "codRateTier",
            FieldName::E2eRateTier => "e2eRateTier",
            FieldName::LmSolution => "lmSolution",
            FieldName::QuoteDate => "quoteDate",
        }
    }

    /// Resolve an edit-event name. Unknown names yield `None`; the store
    /// treats that as a no-op so unexpected UI names never crash the form.
    pub fn from_input_name(name: &str) -> Option<FieldName> {
        FieldName::ALL.iter().copied().find(|f| f.input_name() == name)
    }

    /// Human-readable label for validation messages and option listings.
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::XbService => "XB Service",
            FieldName::SalesChannel => "Sales Channel",
            FieldName::OriginCountry => "Origin Country",
            FieldName::DestinationCountry => "Destination Country",
            FieldName::BusinessModel => "B2B or B2C",
            FieldName::FreightMode => "Freight Mode",
            FieldName::Cod => "COD / Non COD",
            FieldName::LmRateTier => "LM Rate Tier",
            FieldName::CodRateTier => "COD Rate Tier",
            FieldName::E2eRateTier => "E2E Rate Tier",
            FieldName::LmSolution => "LM Solution Type",
            FieldName::QuoteDate => "Quote Date",
        }
    }

    /// Picklist-source key for fields with a static option set.
    pub fn picklist_key(&self) -> Option<&'static str> {
        match self {
            FieldName::E2eRateTier => Some("E2E_Rate_Tier"),
            FieldName::LmRateTier => Some("LM_Rate_Tier"),
            FieldName::CodRateTier => Some("COD_Rate_Tier"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_fields_unique() {
        let unique: HashSet<_> = FieldName::ALL.iter().collect();
        assert_eq!(unique.len(), FieldName::ALL.len());
    }

    #[test]
    fn test_input_name_round_trip() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::from_input_name(field.input_name()), Some(field));
        }
    }

    #[test]
    fn test_unknown_input_name() {
        assert_eq!(FieldName::from_input_name("notAField"), None);
        assert_eq!(FieldName::from_input_name(""), None);
        // Matching is exact, not case-insensitive.
        assert_eq!(FieldName::from_input_name("QuoteDate"), None);
    }

    #[test]
    fn test_required_fields_are_user_editable() {
        // The default required set is exactly the user-input fields; all of
        // them except the tiers are absent from the record-sourced set.
        assert!(FieldName::DEFAULT_REQUIRED.contains(&FieldName::QuoteDate));
        assert!(FieldName::DEFAULT_REQUIRED.contains(&FieldName::LmSolution));
        assert!(!FieldName::RECORD_SOURCED.contains(&FieldName::QuoteDate));
        assert!(!FieldName::RECORD_SOURCED.contains(&FieldName::LmSolution));
    }

    #[test]
    fn test_static_picklist_keys() {
        assert_eq!(FieldName::E2eRateTier.picklist_key(), Some("E2E_Rate_Tier"));
        assert_eq!(FieldName::QuoteDate.picklist_key(), None);
        assert_eq!(FieldName::LmSolution.picklist_key(), None);
    }
}
