//! Localization table for validation messages.
//!
//! Validators only emit [`MessageCode`]s; the text shown next to a form
//! input is looked up here. French is the default since the documents are
//! French commercial documents.

use serde::{Deserialize, Serialize};

use super::error::MessageCode;

/// Language used to render validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl MessageCode {
    /// Render this code in the given locale.
    pub fn localize(&self, locale: Locale) -> String {
        match locale {
            Locale::Fr => french(*self),
            Locale::En => english(*self),
        }
    }
}

fn french(code: MessageCode) -> String {
    use MessageCode::*;
    match code {
        Required => "Ce champ est requis".into(),
        IssueDateRequired => "La date d'émission est requise".into(),
        DueDateRequired => "La date d'échéance est requise".into(),
        ValidUntilRequired => "La date de validité est requise".into(),
        InvalidDate => "La date n'est pas valide".into(),
        DescriptionInvalid => {
            "La description contient des caractères non autorisés (1 à 200 caractères)".into()
        }
        UnitInvalid => "L'unité contient des caractères non autorisés (1 à 20 caractères)".into(),
        InvalidCharacters => "Ce champ contient des caractères non autorisés".into(),
        TooLong { max } => format!("Ce champ ne peut pas dépasser {max} caractères"),
        InvalidUrl => "L'URL n'est pas valide (elle doit commencer par http:// ou https://)".into(),
        LinkTitleRequired => "Le titre du lien est requis lorsqu'une URL est renseignée".into(),
        NotANumber => "La valeur doit être un nombre".into(),
        QuantityNotPositive => "La quantité doit être supérieure à 0".into(),
        UnitPriceNotPositive => "Le prix unitaire doit être supérieur à 0".into(),
        UnitPriceNegative => "Le prix unitaire ne peut pas être négatif".into(),
        VatRateOutOfRange => "Le taux de TVA doit être compris entre 0 et 100".into(),
        DiscountNegative => "La remise doit être un nombre positif".into(),
        PercentageAbove100 => "La remise en pourcentage ne peut pas dépasser 100 %".into(),
        TooManyItems { max } => format!("Un document ne peut pas contenir plus de {max} lignes"),
        ExemptionMentionRequired => {
            "Une mention d'exonération de TVA est obligatoire lorsque le taux est de 0 %".into()
        }
        DueBeforeIssue => {
            "La date d'échéance doit être postérieure ou égale à la date d'émission".into()
        }
        ValidUntilBeforeIssue => {
            "La date de validité doit être postérieure ou égale à la date d'émission".into()
        }
        ExecutionBeforeIssue => {
            "La date d'exécution doit être postérieure ou égale à la date d'émission".into()
        }
    }
}

fn english(code: MessageCode) -> String {
    use MessageCode::*;
    match code {
        Required => "this field is required".into(),
        IssueDateRequired => "issue date required".into(),
        DueDateRequired => "due date required".into(),
        ValidUntilRequired => "validity date required".into(),
        InvalidDate => "invalid date".into(),
        DescriptionInvalid => "description contains forbidden characters (1-200 characters)".into(),
        UnitInvalid => "unit contains forbidden characters (1-20 characters)".into(),
        InvalidCharacters => "this field contains forbidden characters".into(),
        TooLong { max } => format!("this field cannot exceed {max} characters"),
        InvalidUrl => "invalid URL (must start with http:// or https://)".into(),
        LinkTitleRequired => "link title is required when a URL is set".into(),
        NotANumber => "value must be a number".into(),
        QuantityNotPositive => "quantity must be greater than 0".into(),
        UnitPriceNotPositive => "unit price must be greater than 0".into(),
        UnitPriceNegative => "unit price cannot be negative".into(),
        VatRateOutOfRange => "VAT rate must be between 0 and 100".into(),
        DiscountNegative => "discount must be a positive number".into(),
        PercentageAbove100 => "percentage discount cannot exceed 100%".into(),
        TooManyItems { max } => format!("a document cannot have more than {max} lines"),
        ExemptionMentionRequired => "a VAT exemption mention is required when the rate is 0%".into(),
        DueBeforeIssue => "due date must be on or after the issue date".into(),
        ValidUntilBeforeIssue => "validity date must be on or after the issue date".into(),
        ExecutionBeforeIssue => "execution date must be on or after the issue date".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_is_default() {
        assert_eq!(Locale::default(), Locale::Fr);
        assert_eq!(
            MessageCode::QuantityNotPositive.localize(Locale::default()),
            "La quantité doit être supérieure à 0"
        );
    }

    #[test]
    fn parameterized_messages() {
        assert_eq!(
            MessageCode::TooLong { max: 50 }.localize(Locale::En),
            "this field cannot exceed 50 characters"
        );
        assert!(
            MessageCode::TooManyItems { max: 10 }
                .localize(Locale::Fr)
                .contains("10 lignes")
        );
    }

    #[test]
    fn issue_date_message() {
        assert_eq!(
            MessageCode::IssueDateRequired.localize(Locale::En),
            "issue date required"
        );
    }
}
