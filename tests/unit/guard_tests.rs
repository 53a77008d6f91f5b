/*!
 * Tests for the placeholder guard's configurable grammar
 */

use mptranslate::app_config::{MaskingMode, TokenGrammarConfig};
use mptranslate::translation::PlaceholderGuard;

/// Test that disabling color codes leaves them unmasked while placeholders
/// stay protected
#[test]
fn test_protect_withColorCodesDisabled_shouldOnlyMaskPlaceholders() {
    let grammar = TokenGrammarConfig {
        color_codes: false,
        ..TokenGrammarConfig::default()
    };
    let guard = PlaceholderGuard::new(&grammar).unwrap();

    let out = guard.protect("&cHello %player_name%");
    assert_eq!(out.tokens.len(), 1);
    assert_eq!(out.tokens[0].original, "%player_name%");
    assert!(out.masked.starts_with("&c"));
}

/// Test that disabling technical ids leaves namespaced ids unmasked
#[test]
fn test_protect_withTechnicalIdsDisabled_shouldLeaveIdsAlone() {
    let grammar = TokenGrammarConfig {
        technical_ids: false,
        ..TokenGrammarConfig::default()
    };
    let guard = PlaceholderGuard::new(&grammar).unwrap();

    let out = guard.protect("Give minecraft:diamond_sword to %player%");
    let originals: Vec<&str> = out.tokens.iter().map(|t| t.original.as_str()).collect();
    assert_eq!(originals, vec!["%player%"]);
}

/// Test custom bracket keywords replace the defaults
#[test]
fn test_protect_withCustomBracketKeywords_shouldMaskThoseOnly() {
    let grammar = TokenGrammarConfig {
        bracket_keywords: vec!["teleport".to_string()],
        ..TokenGrammarConfig::default()
    };
    let guard = PlaceholderGuard::new(&grammar).unwrap();

    let out = guard.protect("[teleport] then [close]");
    assert_eq!(out.tokens.len(), 1);
    assert_eq!(out.tokens[0].original, "[teleport]");
    assert!(out.masked.contains("[close]"));
}

/// Test a dense real-world scalar ends up fully masked and fully restored
#[test]
fn test_protectUnprotect_withDenseScalar_shouldRoundTrip() {
    let guard = PlaceholderGuard::new(&TokenGrammarConfig::default()).unwrap();
    let input = "&#ff0000%prefix% Buy minecraft:emerald with essentials.shop.buy [message]";

    let guarded = guard.protect(input);
    // Masked text exposes none of the reserved tokens to the backend
    assert!(!guarded.masked.contains('%'));
    assert!(!guarded.masked.contains("minecraft:"));
    assert!(!guarded.masked.contains("essentials."));
    assert!(!guarded.masked.contains("[message]"));

    // Identity "translation" restores the exact input
    let restored = guard.unprotect(&guarded.masked, &guarded);
    assert_eq!(restored, input);
}

/// Test passthrough masking keeps the scalar unchanged before the call
#[test]
fn test_passthroughMasking_shouldSendOriginalText() {
    let grammar = TokenGrammarConfig {
        masking: MaskingMode::Passthrough,
        ..TokenGrammarConfig::default()
    };
    let guard = PlaceholderGuard::new(&grammar).unwrap();

    let guarded = guard.protect("Pay %cost% coins");
    assert_eq!(guarded.masked, "Pay %cost% coins");

    // A backend that dropped the token is tolerated, not fatal
    let restored = guard.unprotect("Payez des pièces", &guarded);
    assert_eq!(restored, "Payez des pièces");
}
