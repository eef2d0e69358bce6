//! Cast composition.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use texttale_core::{Character, CharacterRole, MAX_USER_CHARACTERS, StoryStyle};

const CAST_SIZE: usize = 3;

const NAMES: &[&str] = &[
    "Ada", "Bram", "Cleo", "Dorian", "Elio", "Fern", "Gideon", "Hollis", "Iris", "Juno",
    "Kestrel", "Lark", "Milo", "Niamh", "Odette", "Pip", "Quill", "Rhea", "Soren", "Talia",
    "Ulric", "Vesper", "Wren", "Xavi", "Yael", "Zephyr", "Arlo", "Briar", "Calla", "Dax",
    "Ember", "Flint", "Greta", "Hugo", "Indra", "Jasper", "Kaia", "Leif", "Maren", "Nico",
    "Orla", "Perrin", "Rowan", "Sable", "Tamsin", "Vale", "Willow", "Zora",
];

const TRAITS: &[&str] = &[
    "brave", "wise", "mysterious", "kind", "cunning", "loyal", "adventurous", "gentle",
    "fierce", "curious", "determined", "compassionate", "clever", "honest", "bold", "patient",
    "creative", "stubborn", "resourceful", "charismatic", "humble", "passionate", "calm",
    "restless",
];

const SUPPORTING_ROLES: &[CharacterRole] = &[
    CharacterRole::Mentor,
    CharacterRole::Guardian,
    CharacterRole::Mystic,
    CharacterRole::Companion,
];

/// Story cast plus its introduction paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cast {
    /// Cast members, protagonist first
    pub characters: Vec<Character>,
    /// Paragraph introducing the cast
    pub introduction: String,
}

/// Builds a three-member cast from optional user-supplied names.
///
/// Randomness comes from an owned [`StdRng`]; seed it with
/// [`CharacterComposer::with_seed`] for reproducible casts.
#[derive(Debug)]
pub struct CharacterComposer {
    rng: Mutex<StdRng>,
}

impl Default for CharacterComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterComposer {
    /// Composer seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Composer with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Compose the cast for a story.
    ///
    /// Blank names are dropped and at most three are used. The first user name is
    /// the protagonist and the rest are allies; remaining seats are filled with
    /// unused names from a fixed pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use texttale_core::{CharacterRole, StoryStyle};
    /// use texttale_narrative::CharacterComposer;
    ///
    /// let composer = CharacterComposer::with_seed(7);
    /// let cast = composer.compose("a haunted mill", StoryStyle::Horror, &["Ada".to_string()]);
    /// assert_eq!(cast.characters.len(), 3);
    /// assert_eq!(cast.characters[0].name, "Ada");
    /// assert_eq!(cast.characters[0].role, CharacterRole::Protagonist);
    /// ```
    #[tracing::instrument(skip(self, prompt, user_names), fields(style = %style, user_names = user_names.len()))]
    pub fn compose(&self, prompt: &str, style: StoryStyle, user_names: &[String]) -> Cast {
        let mut rng = self.rng.lock();

        let mut seats: Vec<(String, CharacterRole)> = user_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .take(MAX_USER_CHARACTERS)
            .enumerate()
            .map(|(i, name)| {
                let role = if i == 0 {
                    CharacterRole::Protagonist
                } else {
                    CharacterRole::Ally
                };
                (name.to_string(), role)
            })
            .collect();

        while seats.len() < CAST_SIZE {
            let taken: Vec<&str> = seats.iter().map(|(name, _)| name.as_str()).collect();
            let available: Vec<&str> = NAMES
                .iter()
                .copied()
                .filter(|name| !taken.contains(name))
                .collect();
            let Some(name) = available.choose(&mut *rng) else {
                break;
            };
            let role = match seats.len() {
                0 => CharacterRole::Protagonist,
                1 => CharacterRole::Ally,
                _ => SUPPORTING_ROLES
                    .choose(&mut *rng)
                    .copied()
                    .unwrap_or(CharacterRole::Companion),
            };
            seats.push((name.to_string(), role));
        }

        let characters: Vec<Character> = seats
            .into_iter()
            .map(|(name, role)| {
                let traits: Vec<&str> = TRAITS.choose_multiple(&mut *rng, 3).copied().collect();
                Character {
                    description: describe(&name, role, &traits, prompt, style),
                    name,
                    role,
                }
            })
            .collect();

        let introduction = introduce(prompt, style, &characters);
        Cast {
            characters,
            introduction,
        }
    }
}

fn describe(
    name: &str,
    role: CharacterRole,
    traits: &[&str],
    prompt: &str,
    style: StoryStyle,
) -> String {
    format!(
        "{} is a {} character in this {} story. {}. They play a crucial role in {}.",
        name,
        traits.join(", "),
        style,
        role.description(),
        prompt.to_lowercase()
    )
}

fn introduce(prompt: &str, style: StoryStyle, characters: &[Character]) -> String {
    let Some(protagonist) = characters
        .iter()
        .find(|c| c.role == CharacterRole::Protagonist)
        .or_else(|| characters.first())
    else {
        return format!("Welcome to '{}', a captivating {} tale.", prompt, style);
    };

    let summary = protagonist
        .description
        .split('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let mut intro = format!(
        "Welcome to '{}', a captivating {} tale. Our story follows {}, {}. ",
        prompt, style, protagonist.name, summary
    );

    let allies: Vec<&str> = characters
        .iter()
        .filter(|c| c.role.is_ally())
        .map(|c| c.name.as_str())
        .collect();
    match allies.as_slice() {
        [] => {}
        [only] => intro.push_str(&format!(
            "Joining {} on this adventure is {}. ",
            protagonist.name, only
        )),
        [rest @ .., last] => intro.push_str(&format!(
            "Accompanying {} are {} and {}. ",
            protagonist.name,
            rest.join(", "),
            last
        )),
    }

    intro.push_str(
        "Together, they will set out on a journey full of wonder, mystery, and danger. ",
    );
    intro.push_str(&format!(
        "Each of them brings something different to this {} world, and the story is richer for it.",
        style
    ));
    intro
}
