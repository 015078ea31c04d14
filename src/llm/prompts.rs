//! System prompts for classification and reply generation.

use std::fmt::Write;

use crate::catalog::{Catalog, Product};
use crate::profile::UserProfile;

/// Build the system prompt asking the model to pick one category.
///
/// # Errors
/// Returns an error if the category list cannot be serialized.
pub fn build_classification_prompt(categories: &[String]) -> serde_json::Result<String> {
    let list = serde_json::to_string(categories)?;
    Ok(format!(
        "You classify shopping requests into product categories.\n\n\
         Available categories (choose exactly one from this list):\n{list}\n\n\
         Rules:\n\
         - Answer with a single category name from the list and nothing else.\n\
         - Never invent a category.\n\
         - If unsure, answer with the closest category from the list."
    ))
}

/// Renders reply-generation prompts around a fixed catalog.
///
/// The catalog JSON is rendered once at construction.
#[derive(Clone, Debug)]
pub struct ReplyPromptBuilder {
    catalog_json: String,
}

impl ReplyPromptBuilder {
    /// Create a builder for the given catalog.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be serialized.
    pub fn new(catalog: &Catalog) -> serde_json::Result<Self> {
        Ok(Self {
            catalog_json: serde_json::to_string_pretty(catalog.products())?,
        })
    }

    /// Prompt used when a specific product matched the request.
    #[must_use]
    pub fn matched(&self, profile: &UserProfile, product: &Product) -> String {
        let mut prompt = String::from(
            "You are a friendly, engaging shopping assistant. You remember earlier \
             messages in this conversation and keep refining suggestions as the \
             shopper's preferences become clearer.\n\n\
             Strict rules:\n\
             - Only ever mention products from the catalog below.\n\
             - If no product clearly fits, offer three options from the catalog.\n\
             - When the shopper follows up, adjust the suggestions accordingly.\n\n",
        );

        let _ = writeln!(prompt, "Catalog (never go outside this list):\n{}\n", self.catalog_json);
        prompt.push_str(&profile_block(profile));
        prompt.push_str("\nBest matching product:\n");
        prompt.push_str(&product_block(product));
        prompt.push_str(
            "\nYour task:\n\
             1. Reply in a warm, natural tone.\n\
             2. Acknowledge what the shopper asked for earlier.\n\
             3. Present the best matching product from the catalog.\n\
             4. If several products fit, ask a follow-up question to narrow it down.\n\
             5. Keep the product details easy to scan.\n",
        );
        prompt
    }

    /// Prompt used when no product matched and random alternatives are shown.
    #[must_use]
    pub fn alternatives(&self, alternatives: &[Product]) -> String {
        let mut prompt = String::from(
            "The shopper did not give enough detail for a specific product match.\n\n\
             Strict rules:\n\
             - Only ever mention products from the catalog below.\n\
             - Pick suggestions from this list only.\n\n",
        );

        let _ = writeln!(prompt, "Catalog (choose from this list only):\n{}\n", self.catalog_json);

        if alternatives.is_empty() {
            prompt.push_str("There are no products to suggest right now.\n");
        } else {
            let _ = writeln!(prompt, "Here are {} product suggestions:\n", alternatives.len());
            for (index, product) in alternatives.iter().enumerate() {
                let _ = writeln!(prompt, "{}. {}", index + 1, product_block(product));
            }
        }

        prompt.push_str(
            "Ask whether the shopper would like one of these, or has something more \
             specific in mind.\n",
        );
        prompt
    }
}

fn profile_block(profile: &UserProfile) -> String {
    let brands = if profile.brand_preference.is_empty() {
        "None".to_string()
    } else {
        profile.brand_preference.join(", ")
    };

    format!(
        "Shopper profile:\n\
         - Preferred category: {}\n\
         - Budget: ${} - ${}\n\
         - Preferred brands: {}\n\
         - Preferred color: {}\n",
        profile.preferred_category.as_deref().unwrap_or("Not set"),
        profile.budget_range.low(),
        profile.budget_range.high(),
        brands,
        profile.color.as_deref().unwrap_or("Not set"),
    )
}

fn product_block(product: &Product) -> String {
    format!(
        "{}\n   - Price: ${}\n   - Brand: {}\n   - Category: {}\n   - Color: {}\n   - Description: {}\n",
        product.name,
        product.price,
        product.brand,
        product.category,
        product.color,
        product.short_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{red_mug, sample_catalog};

    #[test]
    fn test_classification_prompt_lists_categories() {
        let prompt =
            build_classification_prompt(&["Home".to_string(), "Shoes".to_string()]).unwrap();
        assert!(prompt.contains(r#"["Home","Shoes"]"#));
    }

    #[test]
    fn test_matched_prompt_embeds_catalog_profile_and_product() {
        let catalog = sample_catalog();
        let builder = ReplyPromptBuilder::new(&catalog).unwrap();
        let mut profile = UserProfile::new();
        profile.add_brand("nike");

        let prompt = builder.matched(&profile, &catalog.products()[0]);
        assert!(prompt.contains("\"name\": \"Desk Lamp\""));
        assert!(prompt.contains("\"price\": 25,"));
        assert!(prompt.contains("Preferred category: Not set"));
        assert!(prompt.contains("Budget: $0 - $1000000"));
        assert!(prompt.contains("Preferred brands: nike"));
        assert!(prompt.contains("Trail Runner\n   - Price: $120"));
    }

    #[test]
    fn test_alternatives_prompt_enumerates_products() {
        let builder = ReplyPromptBuilder::new(&sample_catalog()).unwrap();
        let prompt = builder.alternatives(&[red_mug()]);
        assert!(prompt.contains("Here are 1 product suggestions"));
        assert!(prompt.contains("1. Red Mug"));
        assert!(prompt.contains("Price: $10"));

        let empty = builder.alternatives(&[]);
        assert!(empty.contains("no products to suggest"));
    }
}
