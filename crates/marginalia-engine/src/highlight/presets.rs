use super::pipeline::{Pipeline, PipelineError};
use super::rules::{Enrichment, Rule};

pub const QUANTITY: &str = "quantity";
pub const INGREDIENT: &str = "ingredient";
pub const MEASURED_INGREDIENT: &str = "ingredient-with-quantity";
pub const INGREDIENT_LINE: &str = "ingredient-line";

/// Units recognised after a number by the recipe quantity pattern.
const UNITS: &str = r"kg|g|mg|ml|cl|dl|l|cups?|tbsp|tsp|oz|lbs?|pinch(?:es)?|cloves?";

/// Longer names first so "milk chocolate" wins over "milk" and "chocolate".
pub const INGREDIENTS: &[&str] = &[
    "milk chocolate",
    "dark chocolate",
    "cocoa powder",
    "baking powder",
    "vanilla extract",
    "brown sugar",
    "chocolate",
    "milk",
    "butter",
    "sugar",
    "flour",
    "eggs",
    "egg",
    "salt",
    "cream",
    "water",
    "garlic",
    "oil",
];

pub fn quantity_pattern() -> String {
    format!(r"(?i)\b\d+(?:[.,]\d+)?(?:\s+\d+/\d+|/\d+)?\s?(?:{UNITS})\b")
}

/// Recipe highlighting: quantities, ingredients and the two derived joins.
pub fn recipe() -> Result<Pipeline, PipelineError> {
    recipe_with_ingredients(INGREDIENTS.iter().copied())
}

pub fn recipe_with_ingredients<I, S>(ingredients: I) -> Result<Pipeline, PipelineError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let quantity =
        Rule::pattern(QUANTITY, &quantity_pattern()).with_enrichment(Enrichment::Quantity);

    Pipeline::new()
        .with_rule(quantity)?
        .with_rule(Rule::list(INGREDIENT, ingredients))?
        .with_rule(Rule::proximity(MEASURED_INGREDIENT, QUANTITY, INGREDIENT, 2))?
        .with_rule(Rule::co_occurrence(INGREDIENT_LINE, [QUANTITY, INGREDIENT]))
}
