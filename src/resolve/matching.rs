//! Allergen matching between a product and a user's allergen list.
//!
//! Matching is case-insensitive substring containment in both directions.
//! Vocabularies differ across sources and locales ("milk" vs "dairy milk
//! protein"), so the heuristic trades false positives for recall: missing a
//! true allergen is the costlier error in this domain.

use crate::models::Product;

/// Compute human-readable warnings for a product against a user's allergens.
///
/// Declared product allergens are checked first; one warning per declared
/// allergen at most, no matter how many user allergens it matches. The
/// free-text ingredient list is then scanned for user allergens that no
/// existing warning mentions yet, so an allergen a source forgot to declare
/// is still caught in the ingredient text.
///
/// A user with no declared allergies is never warned, whatever the product
/// contains.
pub fn allergen_warnings(product: &Product, user_allergens: &[String]) -> Vec<String> {
    if user_allergens.is_empty() {
        return Vec::new();
    }

    let mut warnings = Vec::new();

    for allergen in &product.allergens {
        for user_allergen in user_allergens {
            if contains_ci(allergen, user_allergen) || contains_ci(user_allergen, allergen) {
                warnings.push(format!("Contains allergen: {allergen}"));
                break;
            }
        }
    }

    for ingredient in &product.ingredients {
        for user_allergen in user_allergens {
            if contains_ci(ingredient, user_allergen)
                && !warnings.iter().any(|w| contains_ci(w, user_allergen))
            {
                warnings.push(format!(
                    "May contain allergen in ingredients: {user_allergen} (found in '{ingredient}')"
                ));
                break;
            }
        }
    }

    warnings
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(allergens: &[&str], ingredients: &[&str]) -> Product {
        Product {
            barcode: "4600000000000".into(),
            name: "Test Product".into(),
            brand: None,
            description: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            allergens: allergens.iter().map(|s| s.to_string()).collect(),
            image_url: None,
            nutrition_grade: None,
            nutrition: None,
        }
    }

    fn allergens(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_user_allergens_never_warn() {
        let p = product(&["milk", "peanut"], &["milk powder"]);
        assert!(allergen_warnings(&p, &[]).is_empty());
    }

    #[test]
    fn undeclared_allergen_found_in_ingredients_only() {
        // The source declared nothing, but the ingredient text gives the
        // allergen away.
        let p = product(&[], &["contains trace peanut"]);
        let warnings = allergen_warnings(&p, &allergens(&["peanut"]));
        assert_eq!(
            warnings,
            vec![
                "May contain allergen in ingredients: peanut (found in 'contains trace peanut')"
                    .to_string()
            ]
        );
    }

    #[test]
    fn clean_product_with_no_declared_allergens_never_warns() {
        let p = product(&[], &["water", "salt"]);
        assert!(allergen_warnings(&p, &allergens(&["milk"])).is_empty());
    }

    #[test]
    fn exact_match_warns_once() {
        let p = product(&["milk"], &[]);
        let warnings = allergen_warnings(&p, &allergens(&["milk"]));
        assert_eq!(warnings, vec!["Contains allergen: milk".to_string()]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let p = product(&["Milk"], &[]);
        let warnings = allergen_warnings(&p, &allergens(&["MILK"]));
        assert_eq!(warnings, vec!["Contains allergen: Milk".to_string()]);
    }

    #[test]
    fn substring_matches_in_both_directions() {
        // Product declares the broader term, user the narrower one.
        let p = product(&["dairy milk protein"], &[]);
        let warnings = allergen_warnings(&p, &allergens(&["milk"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("dairy milk protein"));

        // And the reverse: user term contains the declared one.
        let p = product(&["milk"], &[]);
        let warnings = allergen_warnings(&p, &allergens(&["dairy milk protein"]));
        assert_eq!(warnings, vec!["Contains allergen: milk".to_string()]);
    }

    #[test]
    fn one_warning_per_declared_allergen() {
        // Two user allergens both match the same declared allergen.
        let p = product(&["milk protein"], &[]);
        let warnings = allergen_warnings(&p, &allergens(&["milk", "protein"]));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn ingredient_scan_finds_undeclared_allergen() {
        let p = product(&["milk"], &["contains trace peanut"]);
        let warnings = allergen_warnings(&p, &allergens(&["peanut"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("peanut"));
        assert!(warnings[0].contains("contains trace peanut"));
        assert_eq!(
            warnings[0],
            "May contain allergen in ingredients: peanut (found in 'contains trace peanut')"
        );
    }

    #[test]
    fn ingredient_scan_does_not_rewarn_declared_allergen() {
        let p = product(&["milk"], &["milk powder", "sugar"]);
        let warnings = allergen_warnings(&p, &allergens(&["milk"]));
        assert_eq!(warnings, vec!["Contains allergen: milk".to_string()]);
    }

    #[test]
    fn ingredient_scan_warns_each_user_allergen_once() {
        let p = product(&["egg"], &["peanut butter", "roasted peanut"]);
        let warnings = allergen_warnings(&p, &allergens(&["egg", "peanut"]));
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0], "Contains allergen: egg");
        assert!(warnings[1].contains("peanut butter"));
    }

    #[test]
    fn unrelated_product_produces_no_warnings() {
        let p = product(&["soy"], &["water", "salt"]);
        assert!(allergen_warnings(&p, &allergens(&["milk", "peanut"])).is_empty());
    }

    #[test]
    fn warnings_preserve_discovery_order() {
        let p = product(&["egg", "milk"], &["wheat flour"]);
        let warnings = allergen_warnings(&p, &allergens(&["milk", "egg", "wheat"]));
        assert_eq!(warnings[0], "Contains allergen: egg");
        assert_eq!(warnings[1], "Contains allergen: milk");
        assert!(warnings[2].starts_with("May contain allergen in ingredients: wheat"));
    }
}
