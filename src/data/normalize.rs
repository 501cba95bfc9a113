//! Text cleanup for the Region and Country columns.
//!
//! The source file mixes casings ("AFRICA", "africa") and carries stray
//! whitespace; charts key on these strings, so they are canonicalized once
//! at load time.

use super::model::TbRecord;

/// Trim surrounding whitespace and title-case the label.
///
/// Title-casing matches the convention the dataset was cleaned with: a
/// letter is uppercased iff it follows a non-alphabetic character, all
/// other letters are lowercased ("côte d'ivoire" → "Côte D'Ivoire").
/// Idempotent; an empty or all-whitespace input yields an empty string.
pub fn clean_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_alpha = false;

    for ch in trimmed.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                // An uppercase mapping can expand to several letters
                // ('ß' → "SS"); only the first may stay uppercase, or a
                // second pass would re-case the rest differently.
                let mut upper = ch.to_uppercase();
                out.extend(upper.next());
                for tail in upper {
                    out.extend(tail.to_lowercase());
                }
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Normalize the text key columns of a record in place.
pub fn normalize_record(record: &mut TbRecord) {
    record.region = clean_label(&record.region);
    record.country = clean_label(&record.country);
    // ISO codes are matched case-sensitively by the map layer.
    record.iso3 = record.iso3.trim().to_ascii_uppercase();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::record;

    #[test]
    fn clean_label_trims_and_title_cases() {
        assert_eq!(clean_label("  south africa "), "South Africa");
        assert_eq!(clean_label("VIET NAM"), "Viet Nam");
        assert_eq!(clean_label("côte d'ivoire"), "Côte D'Ivoire");
        assert_eq!(clean_label(""), "");
        assert_eq!(clean_label("   "), "");
    }

    #[test]
    fn clean_label_is_idempotent() {
        for raw in ["  lao people's democratic republic ", "AFR", "Bonaire, Saint Eustatius And Saba"] {
            let once = clean_label(raw);
            assert_eq!(clean_label(&once), once);
        }
    }

    #[test]
    fn clean_label_is_idempotent_for_expanding_uppercase() {
        // 'ß' uppercases to the two-letter "SS"; only the first letter may
        // stay capital or the second pass would disagree with the first.
        assert_eq!(clean_label("ßeta"), "Sseta");
        let once = clean_label("ßeta straße");
        assert_eq!(clean_label(&once), once);
    }

    #[test]
    fn normalize_record_touches_only_key_columns() {
        let mut rec = record(" afr ", "  viet nam", 2000);
        rec.iso3 = " vnm ".to_string();
        normalize_record(&mut rec);
        assert_eq!(rec.region, "Afr");
        assert_eq!(rec.country, "Viet Nam");
        assert_eq!(rec.iso3, "VNM");
        assert_eq!(rec.year, 2000);
    }
}
