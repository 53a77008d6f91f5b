/*!
 * Prompt construction for LLM-backed translation.
 *
 * The rules encode what plugin locale files may never lose in translation:
 * keys, namespaced identifiers, commands and permission nodes, color codes,
 * enumeration values, placeholders and reserved keywords.
 */

/// Builder for the locale-translation system prompt
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    target_language: String,
}

impl PromptBuilder {
    /// Create a builder for a target language name (e.g. "Chinese (TW)")
    pub fn new(target_language: impl Into<String>) -> Self {
        Self { target_language: target_language.into() }
    }

    /// The system prompt sent ahead of every translation request
    pub fn system_prompt(&self) -> String {
        format!(
            "When translating Minecraft plugin configuration strings, adhere to the following rules:\n\
             Target output language: {target}\n\
             1. Key and property names are referenced by plugin code and must remain unchanged.\n\
             2. Namespaces and technical identifiers, such as `minecraft:diamond_sword`, must remain unchanged.\n\
             3. Use ASCII punctuation, such as `:` instead of `：`, so the file structure is not disrupted.\n\
             4. Commands (e.g. `/give`) and permission nodes (e.g. `pluginname.command.give`) must remain unchanged.\n\
             5. Formatting and color codes (e.g. `&c` for red text) must not be translated.\n\
             6. Data and enumeration values such as `true`/`false` must be kept in their original form.\n\
             7. Placeholders and variables, such as `%player_name%`, are markers for dynamic replacement and must remain unchanged.\n\
             8. Reserved keywords like `[refresh]`, `[console]`, `[close]`, `[message]` must not be translated.\n\
             9. Item material ids such as `green_stained_glass_pane` are game identifiers; do not translate them.\n\
             10. Expressions starting with special symbols, like `!has permission`, must not be translated.\n\
             11. Sentinel markers of the form `<<T0>>` or `<<ENTRY_0>>` must be reproduced exactly where they appear.\n\
             12. Do not add code fences or any other symbols around the output.\n\
             Translate the text that follows and output nothing but the translation.",
            target = self.target_language
        )
    }

    /// Build the full prompt for a single text
    pub fn single_request(&self, text: &str) -> String {
        format!("{}\n\n{}", self.system_prompt(), text)
    }

    /// Build the full prompt for a marker-framed batch
    pub fn batch_request(&self, framed: &str) -> String {
        format!(
            "{}\n\nThe input contains multiple entries delimited by `<<ENTRY_n>>` markers and \
             terminated by `<<END>>`. Translate the text of every entry and reproduce every \
             marker exactly, in the same order.\n\n{}",
            self.system_prompt(),
            framed
        )
    }
}
