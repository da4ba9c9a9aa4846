use crate::games::SessionRng;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Fierce", "Gentle", "Quick", "Wise", "Bold", "Proud", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Python", "Cobra", "Viper", "Mamba", "Adder", "Boa", "Krait", "Taipan",
    "Asp", "Racer", "Sidewinder", "Anaconda", "Rattler", "Copperhead", "Garter", "Kingsnake",
];

pub fn generate_guest_name(rng: &mut SessionRng) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}

pub fn generate_player_id(rng: &mut SessionRng) -> String {
    format!("guest-{:016x}", rng.random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_name_has_two_words() {
        let mut rng = SessionRng::new(7);
        let name = generate_guest_name(&mut rng);
        assert_eq!(name.split(' ').count(), 2);
    }

    #[test]
    fn test_player_id_is_stable_for_seed() {
        let a = generate_player_id(&mut SessionRng::new(11));
        let b = generate_player_id(&mut SessionRng::new(11));
        assert_eq!(a, b);
        assert!(a.starts_with("guest-"));
        assert_eq!(a.len(), "guest-".len() + 16);
    }
}
