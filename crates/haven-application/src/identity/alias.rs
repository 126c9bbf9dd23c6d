use rand::Rng;
use rand::seq::SliceRandom;

const PREFIXES: [&str; 8] = [
    "Sky", "River", "Mountain", "Echo", "Shield", "Safe", "North", "Light",
];
const SUFFIXES: [&str; 7] = ["Walker", "Guard", "Keeper", "Path", "Way", "Hope", "Voice"];

/// Random survivor alias such as `EchoKeeper_4821`.
pub fn generate_alias() -> String {
    let mut rng = rand::thread_rng();
    let prefix = PREFIXES.choose(&mut rng).copied().unwrap_or("Safe");
    let suffix = SUFFIXES.choose(&mut rng).copied().unwrap_or("Path");
    let num: u16 = rng.gen_range(1000..=9999);
    format!("{prefix}{suffix}_{num}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_shape() {
        for _ in 0..50 {
            let alias = generate_alias();
            let (word, num) = alias.split_once('_').unwrap();
            assert!(PREFIXES.iter().any(|p| word.starts_with(p)));
            assert!(SUFFIXES.iter().any(|s| word.ends_with(s)));
            let num: u16 = num.parse().unwrap();
            assert!((1000..=9999).contains(&num));
        }
    }
}
