//! Scene planning.
//!
//! Each length maps to a fixed sequence of narrative beats; each beat renders one
//! scene from a prose template.

use texttale_core::{StoryLength, StoryPlan, StoryStyle};

const SHORT: &[&str] = &[
    "introduction",
    "setting",
    "conflict",
    "rising_action",
    "climax",
    "resolution",
    "conclusion",
];

const MEDIUM: &[&str] = &[
    "introduction",
    "character_development",
    "setting",
    "conflict_introduction",
    "rising_action_1",
    "rising_action_2",
    "complications",
    "climax",
    "falling_action",
    "resolution",
    "conclusion",
];

const LONG: &[&str] = &[
    "introduction",
    "character_background",
    "setting_establishment",
    "inciting_incident",
    "rising_action_1",
    "character_development",
    "rising_action_2",
    "complications_1",
    "midpoint",
    "complications_2",
    "rising_action_3",
    "climax",
    "falling_action_1",
    "falling_action_2",
    "resolution",
    "denouement",
    "conclusion",
];

/// Beat sequence for a story length.
pub fn structure(length: StoryLength) -> &'static [&'static str] {
    match length {
        StoryLength::Short => SHORT,
        StoryLength::Medium => MEDIUM,
        StoryLength::Long => LONG,
    }
}

/// Template key for a beat.
///
/// Numbered repeats (`rising_action_2`) and introductory variants
/// (`conflict_introduction`) share their base beat's template.
///
/// # Examples
///
/// ```
/// use texttale_narrative::base_beat;
///
/// assert_eq!(base_beat("rising_action_2"), "rising_action");
/// assert_eq!(base_beat("conflict_introduction"), "conflict");
/// assert_eq!(base_beat("midpoint"), "midpoint");
/// ```
pub fn base_beat(beat: &str) -> &str {
    if template(beat, "", "").is_some() {
        return beat;
    }
    let trimmed = match beat.rsplit_once('_') {
        Some((head, tail)) if tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => beat,
    };
    trimmed.strip_suffix("_introduction").unwrap_or(trimmed)
}

fn template(beat: &str, prompt: &str, style: &str) -> Option<String> {
    let text = match beat {
        "introduction" => format!(
            "Somewhere in a {style} world, {prompt} begins on an ordinary morning that will not stay ordinary for long. \
             A small detail is out of place, and once noticed it cannot be ignored. The first step is taken before doubt can catch up."
        ),
        "setting" => format!(
            "The {style} land around {prompt} opens up in every direction, old roads and older ruins layered over one another. \
             Strange lights move at the edge of sight and the wind carries voices from far away. Every path seems to lead somewhere that matters."
        ),
        "conflict" => format!(
            "Trouble arrives for {prompt} without warning, and it is bigger than anyone expected. \
             What seemed simple now carries a real cost, and walking away is no longer an option. Friends and rivals wait to see what happens next."
        ),
        "rising_action" => format!(
            "Each obstacle in front of {prompt} is harder than the last, and help comes from unlikely places. \
             The {style} world reveals more of its hidden workings with every mile. The danger grows, but so does the sense of purpose."
        ),
        "climax" => format!(
            "Everything comes to a head for {prompt} in a single decisive moment. \
             Every lesson of this {style} tale is put to the test at once, and the outcome will shape the world that follows."
        ),
        "resolution" => format!(
            "Out of the chaos, {prompt} finds a way through. \
             The problems that seemed impossible start to untangle, and a quieter kind of hope takes their place. What was learned the hard way is not forgotten."
        ),
        "conclusion" => format!(
            "The {style} journey of {prompt} comes to rest, though its echoes carry on. \
             Others will hear this story and set out on their own roads, braver for having heard it."
        ),
        "character_development" => format!(
            "The trials of this {style} road change {prompt} in ways that are hard to see at first. \
             Old fears lose their grip and unexpected strengths surface. The person who started the journey is not the one who will finish it."
        ),
        "complications" => format!(
            "Nothing goes to plan for {prompt}. Secrets surface, allies hesitate, and the {style} world shifts underfoot. \
             Certainties crumble, and adapting becomes the only way forward."
        ),
        "falling_action" => format!(
            "The storm around {prompt} begins to pass. \
             In the quiet that follows, there is finally time to understand what this {style} adventure has cost and what it has given."
        ),
        "character_background" => format!(
            "The past of {prompt} comes into view, choice by choice, memory by memory. \
             In this {style} world, history is not behind anyone; it walks alongside them and points the way."
        ),
        "setting_establishment" => format!(
            "The {style} surroundings sharpen into focus as {prompt} learns how this place really works. \
             Walls carry stories, creatures keep old promises, and nothing is quite as it first appeared."
        ),
        "inciting_incident" => format!(
            "One event changes everything for {prompt}. \
             A {style} journey begins that will test every limit and rewrite every assumption. There is no going back."
        ),
        "midpoint" => format!(
            "Halfway through the {style} adventure, {prompt} reaches a turning point. \
             A revelation reframes everything that came before and sets the rest of the journey on a new course."
        ),
        "denouement" => format!(
            "The last loose threads of the story of {prompt} are tied off one by one. \
             This {style} tale closes gently, leaving just enough room for whatever comes next."
        ),
        "continuation" => format!(
            "{prompt} presses on through the {style} world, meeting new trials and learning hidden truths. \
             Every step reveals another mystery worth chasing."
        ),
        _ => return None,
    };
    Some(text)
}

fn render(beat: &str, prompt: &str, style: &str) -> String {
    template(base_beat(beat), prompt, style)
        .or_else(|| template("continuation", prompt, style))
        .unwrap_or_default()
}

/// Deterministic scene planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenePlanner;

impl ScenePlanner {
    /// Create a planner.
    pub fn new() -> Self {
        Self
    }

    /// Lay out the scenes for `prompt` in `style` and `length`.
    ///
    /// The same inputs always produce the same plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use texttale_core::{StoryLength, StoryStyle};
    /// use texttale_narrative::ScenePlanner;
    ///
    /// let plan = ScenePlanner::new().plan("a lighthouse keeper", StoryStyle::Mystery, StoryLength::Short);
    /// assert_eq!(plan.len(), 7);
    /// assert!(plan.scenes()[0].text.contains("a lighthouse keeper"));
    /// ```
    #[tracing::instrument(skip(self, prompt), fields(style = %style, length = %length))]
    pub fn plan(&self, prompt: &str, style: StoryStyle, length: StoryLength) -> StoryPlan {
        let style = style.to_string();
        let plan = StoryPlan::from_texts(
            structure(length)
                .iter()
                .map(|beat| render(beat, prompt, &style)),
        );
        tracing::debug!(scenes = plan.len(), "Planned story");
        plan
    }
}
