//! TemplateVariable - Placeholders the generated HTML may reference

use std::fmt;

/// A substitution variable available to generated templates.
///
/// Templates reference variables with the `{{name}}` syntax; the caller
/// substitutes real values after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariable {
    OrderId,
    CustomerId,
    Quantity,
    OrderDate,
    Price,
}

impl TemplateVariable {
    /// All variables in the order they are presented to the model
    pub const ALL: [TemplateVariable; 5] = [
        TemplateVariable::OrderId,
        TemplateVariable::CustomerId,
        TemplateVariable::Quantity,
        TemplateVariable::OrderDate,
        TemplateVariable::Price,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateVariable::OrderId => "order_id",
            TemplateVariable::CustomerId => "customer_id",
            TemplateVariable::Quantity => "quantity",
            TemplateVariable::OrderDate => "order_date",
            TemplateVariable::Price => "price",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateVariable::OrderId => "The order identifier",
            TemplateVariable::CustomerId => "The customer identifier",
            TemplateVariable::Quantity => "The quantity of items",
            TemplateVariable::OrderDate => "The date when the order was placed",
            TemplateVariable::Price => "The total price of the order",
        }
    }

    /// `{{name}}` form used inside templates
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self)
    }
}

impl fmt::Display for TemplateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_uses_double_braces() {
        assert_eq!(TemplateVariable::OrderId.placeholder(), "{{order_id}}");
        assert_eq!(TemplateVariable::Price.placeholder(), "{{price}}");
    }

    #[test]
    fn test_all_is_in_presentation_order() {
        let names: Vec<_> = TemplateVariable::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec!["order_id", "customer_id", "quantity", "order_date", "price"]
        );
    }

    #[test]
    fn test_display_is_the_bare_name() {
        assert_eq!(TemplateVariable::OrderDate.to_string(), "order_date");
    }
}
