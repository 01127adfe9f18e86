//! Prompt construction
//!
//! The built-in system prompt and the user instruction sent alongside it.

use super::value_objects::TemplateVariable;

const INSTRUCTIONS: [&str; 7] = [
    "Generate complete, valid HTML markup",
    "Use the variables above with the {{variable_name}} syntax",
    "Create responsive, modern designs with CSS",
    "Include proper styling and layout",
    "Make the templates professional and user-friendly",
    "Use semantic HTML elements where appropriate",
    "Include comments explaining the structure if needed",
];

/// Built-in system prompt used when the caller does not supply one
pub fn default_system_prompt() -> String {
    let mut prompt = String::from(
        "You are an expert HTML template generator. Your job is to create HTML templates that use the following 5 variables:\n\n",
    );

    prompt.push_str("Available Variables:\n");
    for variable in TemplateVariable::ALL {
        prompt.push_str(&format!(
            "- {} - {}\n",
            variable.placeholder(),
            variable.description()
        ));
    }

    prompt.push_str("\nInstructions:\n");
    for (i, instruction) in INSTRUCTIONS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, instruction));
    }

    prompt.push_str(&format!(
        "\nExample usage: If user asks for an order confirmation email, create HTML that displays order details using {}, {}, etc.\n\n",
        TemplateVariable::OrderId.placeholder(),
        TemplateVariable::CustomerId.placeholder()
    ));
    prompt.push_str("Always respond with complete, ready-to-use HTML code.");

    prompt
}

/// User-facing instruction restating the caller's prompt and the variable names
pub fn user_instruction(prompt: &str) -> String {
    let variables = TemplateVariable::ALL
        .iter()
        .map(|v| v.placeholder())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate an HTML template for: {}\n\nUse the available variables: {}",
        prompt, variables
    )
}
