//! English ordinal words for nesting levels (`first`, `second`, ...).

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Spell `n` as an English ordinal word.
///
/// ```
/// assert_eq!(signpost::ordinal::ordinal(2), "second");
/// assert_eq!(signpost::ordinal::ordinal(21), "twenty-first");
/// ```
pub fn ordinal(n: usize) -> String {
    let words = cardinal(n);

    // Only the final word takes the ordinal suffix.
    let split = words.rfind([' ', '-']).map_or(0, |i| i + 1);
    let (head, last) = words.split_at(split);
    format!("{head}{}", ordinal_word(last))
}

/// Spell `n` as an English cardinal number.
pub fn cardinal(n: usize) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let group = rest % 1000;
        if group > 0 {
            let mut words = below_thousand(group);
            if !SCALES[scale].is_empty() {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        rest /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

fn below_thousand(n: usize) -> String {
    let hundreds = n / 100;
    let remainder = n % 100;

    let mut parts = Vec::new();
    if hundreds > 0 {
        parts.push(format!("{} hundred", ONES[hundreds]));
    }
    if remainder > 0 {
        parts.push(below_hundred(remainder));
    }
    parts.join(" ")
}

fn below_hundred(n: usize) -> String {
    if n < 20 {
        return ONES[n].to_string();
    }
    match (TENS[n / 10], n % 10) {
        (tens, 0) => tens.to_string(),
        (tens, ones) => format!("{tens}-{}", ONES[ones]),
    }
}

fn ordinal_word(word: &str) -> String {
    match word {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{w}th"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ordinals() {
        assert_eq!(ordinal(0), "zeroth");
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(2), "second");
        assert_eq!(ordinal(3), "third");
        assert_eq!(ordinal(4), "fourth");
        assert_eq!(ordinal(5), "fifth");
        assert_eq!(ordinal(8), "eighth");
        assert_eq!(ordinal(9), "ninth");
        assert_eq!(ordinal(12), "twelfth");
        assert_eq!(ordinal(13), "thirteenth");
    }

    #[test]
    fn compound_ordinals() {
        assert_eq!(ordinal(20), "twentieth");
        assert_eq!(ordinal(21), "twenty-first");
        assert_eq!(ordinal(42), "forty-second");
        assert_eq!(ordinal(90), "ninetieth");
    }

    #[test]
    fn large_ordinals() {
        assert_eq!(ordinal(100), "one hundredth");
        assert_eq!(ordinal(101), "one hundred first");
        assert_eq!(ordinal(1000), "one thousandth");
        assert_eq!(ordinal(1_000_003), "one million third");
    }

    #[test]
    fn cardinals_skip_empty_groups() {
        assert_eq!(cardinal(1_000_020), "one million twenty");
        assert_eq!(cardinal(215), "two hundred fifteen");
    }
}
