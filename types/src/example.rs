//! Example snippet bodies written by the "add snippet" command.

use crate::{LanguageKey, SnippetDefinition};

pub const EXAMPLE_NAME: &str = "Test";
pub const EXAMPLE_PREFIX: &str = "test";
pub const EXAMPLE_DESCRIPTION: &str = "Test";

/// Body used for languages without an entry in [`EXAMPLE_BODIES`].
const FALLBACK_BODY: &[&str] = &["console.log('Test');"];

const EXAMPLE_BODIES: &[(&str, &[&str])] = &[
    ("python", &["print('Test')"]),
    ("html", &["<div>Test</div>"]),
    ("css", &[".test {", "  color: red;", "}"]),
    ("java", &["System.out.println(\"Test\");"]),
    ("csharp", &["Console.WriteLine(\"Test\");"]),
    ("cpp", &["std::cout << \"Test\" << std::endl;"]),
    ("php", &["echo \"Test\";"]),
    ("ruby", &["puts \"Test\""]),
    ("go", &["fmt.Println(\"Test\")"]),
    ("rust", &["println!(\"Test\");"]),
    ("swift", &["print(\"Test\")"]),
    ("typescript", &["console.log('Test');"]),
];

/// Languages offered in the language picker, as `(id, display name)`.
pub const COMMON_LANGUAGES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("java", "Java"),
    ("csharp", "C#"),
    ("cpp", "C++"),
    ("php", "PHP"),
    ("ruby", "Ruby"),
    ("go", "Go"),
];

/// Example body lines for a language.
#[must_use]
pub fn example_body(language: &LanguageKey) -> &'static [&'static str] {
    EXAMPLE_BODIES
        .iter()
        .find(|(id, _)| *id == language.as_str())
        .map_or(FALLBACK_BODY, |(_, body)| body)
}

/// The `Test` example definition for a language.
#[must_use]
pub fn example_definition(language: &LanguageKey) -> SnippetDefinition {
    let body = example_body(language)
        .iter()
        .map(|line| (*line).to_string())
        .collect();
    SnippetDefinition::new(
        EXAMPLE_NAME,
        EXAMPLE_PREFIX,
        body,
        Some(EXAMPLE_DESCRIPTION.to_string()),
    )
    .expect("example table entries are valid definitions")
}
