//! Text corruption primitives used by the entity generators

use rand::Rng;

/// With the given probability, flip the case of one character at a random
/// position after the first. Text of two characters or fewer is returned
/// unchanged even when the draw fires.
pub fn mutate_case<R: Rng + ?Sized>(text: &str, probability: f64, rng: &mut R) -> String {
    if !rng.gen_bool(probability) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 2 {
        return text.to_string();
    }

    let idx = rng.gen_range(1..chars.len());
    let mut out = String::with_capacity(text.len());
    for (i, c) in chars.into_iter().enumerate() {
        if i != idx {
            out.push(c);
        } else if c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// With the given probability, surround the text with two spaces on each side
pub fn pad_whitespace<R: Rng + ?Sized>(text: &str, probability: f64, rng: &mut R) -> String {
    if rng.gen_bool(probability) {
        format!("  {}  ", text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_mutate_case_never_touches_first_char() {
        let mut rng = rng();
        for _ in 0..200 {
            let out = mutate_case("Uwimana", 1.0, &mut rng);
            assert!(out.starts_with('U'));
            assert_ne!(out, "Uwimana");
            let changed = out
                .chars()
                .zip("Uwimana".chars())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn test_mutate_case_short_text_unchanged() {
        let mut rng = rng();
        assert_eq!(mutate_case("", 1.0, &mut rng), "");
        assert_eq!(mutate_case("A", 1.0, &mut rng), "A");
        assert_eq!(mutate_case("Ab", 1.0, &mut rng), "Ab");
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = rng();
        assert_eq!(mutate_case("Grace", 0.0, &mut rng), "Grace");
        assert_eq!(pad_whitespace("Grace", 0.0, &mut rng), "Grace");
    }

    #[test]
    fn test_pad_whitespace_wraps_two_spaces() {
        let mut rng = rng();
        assert_eq!(pad_whitespace("Architecture", 1.0, &mut rng), "  Architecture  ");
        assert_eq!(pad_whitespace("", 1.0, &mut rng), "    ");
        assert_eq!(pad_whitespace("x", 1.0, &mut rng), "  x  ");
    }

    proptest! {
        #[test]
        fn mutate_case_preserves_letters_ignoring_case(
            text in "[A-Za-z]{0,24}",
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let out = mutate_case(&text, 0.5, &mut rng);
            prop_assert_eq!(out.len(), text.len());
            prop_assert_eq!(out.to_lowercase(), text.to_lowercase());
        }

        #[test]
        fn pad_whitespace_trims_back_to_input(
            text in "[A-Za-z ]{0,24}",
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let out = pad_whitespace(&text, 0.5, &mut rng);
            let padded = format!("  {}  ", text);
            prop_assert!(out == text || out == padded);
        }
    }
}
