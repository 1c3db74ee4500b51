use serde::{Deserialize, Serialize};

/// Legal grounds for invoicing a line at 0% TVA, each with the mention the
/// CGI expects on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExemptionReason {
    /// Franchise en base (auto-entrepreneurs, micro-entreprises).
    Franchise,
    /// Intra-community supply of goods to a VAT-registered EU buyer.
    IntraCommunitySupply,
    /// Export of goods outside the EU.
    Export,
    /// Reverse charge, VAT due by the buyer (construction subcontracting...).
    ReverseCharge,
    /// B2B services to a buyer established in another EU member state.
    EuServices,
    /// Activities exempt by nature (medical, teaching, insurance...).
    ExemptActivity,
}

impl ExemptionReason {
    pub const ALL: [ExemptionReason; 6] = [
        Self::Franchise,
        Self::IntraCommunitySupply,
        Self::Export,
        Self::ReverseCharge,
        Self::EuServices,
        Self::ExemptActivity,
    ];

    /// Text to print as the line's exemption mention.
    pub fn mention(&self) -> &'static str {
        match self {
            Self::Franchise => "TVA non applicable, art. 293 B du CGI",
            Self::IntraCommunitySupply => "Exonération de TVA, article 262 ter I du CGI",
            Self::Export => "Exonération de TVA, article 262 I du CGI",
            Self::ReverseCharge => "Autoliquidation, article 283-2 du CGI",
            Self::EuServices => "Autoliquidation, article 283-2 du CGI et article 196 de la directive 2006/112/CE",
            Self::ExemptActivity => "Exonération de TVA, article 261 du CGI",
        }
    }

    /// CGI article the mention refers to.
    pub fn article(&self) -> &'static str {
        match self {
            Self::Franchise => "293 B",
            Self::IntraCommunitySupply => "262 ter I",
            Self::Export => "262 I",
            Self::ReverseCharge | Self::EuServices => "283-2",
            Self::ExemptActivity => "261",
        }
    }

    /// Recognize the reason behind a free-text mention by its article
    /// reference. Returns `None` when no known article is cited.
    pub fn detect(text: &str) -> Option<ExemptionReason> {
        let normalized = text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.contains("directive") && normalized.contains("196") {
            return Some(Self::EuServices);
        }
        // Longest articles first: "262 ter i" before "262 i", "293 b" before "261".
        [
            ("293 b", Self::Franchise),
            ("262 ter i", Self::IntraCommunitySupply),
            ("262 i", Self::Export),
            ("283-2", Self::ReverseCharge),
            ("283 2", Self::ReverseCharge),
            ("261", Self::ExemptActivity),
        ]
        .into_iter()
        .find(|(article, _)| normalized.contains(article))
        .map(|(_, reason)| reason)
    }
}
