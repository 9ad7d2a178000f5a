/// The external sources a fetch-and-forward command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// Random pickup line.
    Pickup,
    /// Random insult.
    Insult,
    /// Cat picture (raw image endpoint).
    Cat,
    /// Dog picture (JSON with image URL, then the image itself).
    Dog,
    /// Cat fact.
    CatFact,
    /// Joke — single-part or setup/delivery two-part.
    Joke,
    /// Duck picture.
    Duck,
    /// Fox picture.
    Fox,
    /// Neko picture.
    Neko,
    /// Chuck Norris joke.
    ChuckNorris,
    /// Corporate buzzword phrase.
    Buzzword,
    /// Useless fact.
    UselessFact,
    /// Techy phrase.
    Techy,
    /// Truth question (rating argument, default pg13).
    Truth,
    /// Dare question.
    Dare,
    /// Would-you-rather question.
    WouldYouRather,
    /// Never-have-I-ever question.
    NeverHaveIEver,
    /// Paranoia question.
    Paranoia,
    /// Color palette, rendered as hex lines.
    Palette,
}

impl FetchKind {
    /// Literal sent verbatim when the source's payload field is absent.
    pub fn fallback(&self) -> &'static str {
        match self {
            FetchKind::Pickup => {
                "Are you a magician? Because whenever I look at you, everyone else disappears."
            }
            FetchKind::Insult => "You're about as useful as a screen door on a submarine.",
            FetchKind::Cat => "No cat today.",
            FetchKind::Dog => "The dog ran away.",
            FetchKind::CatFact => "Cats sleep for around 70% of their lives.",
            FetchKind::Joke => "I had a joke, but it fell flat.",
            FetchKind::Duck => "The duck flew off.",
            FetchKind::Fox => "The fox is hiding.",
            FetchKind::Neko => "The neko wandered off.",
            FetchKind::ChuckNorris => "Chuck Norris can divide by zero.",
            FetchKind::Buzzword => "Synergize the paradigm going forward.",
            FetchKind::UselessFact => "Bananas are berries, but strawberries are not.",
            FetchKind::Techy => "It works on my machine.",
            FetchKind::Truth
            | FetchKind::Dare
            | FetchKind::WouldYouRather
            | FetchKind::NeverHaveIEver
            | FetchKind::Paranoia => "The question machine is out of questions.",
            FetchKind::Palette => "No palette today.",
        }
    }

    /// Caption attached to image payloads.
    pub fn caption(&self) -> Option<&'static str> {
        match self {
            FetchKind::Cat => Some("Here's a cat for you! 🐱"),
            FetchKind::Dog => Some("Here's a dog for you! 🐶"),
            FetchKind::Duck => Some("Here's a duck for you! 🦆"),
            FetchKind::Fox => Some("Here's a fox for you! 🦊"),
            FetchKind::Neko => Some("Here's a neko for you! 🐱"),
            _ => None,
        }
    }

    /// Whether the rating argument applies (truth-or-dare API family).
    pub fn takes_rating(&self) -> bool {
        matches!(
            self,
            FetchKind::Truth
                | FetchKind::Dare
                | FetchKind::WouldYouRather
                | FetchKind::NeverHaveIEver
                | FetchKind::Paranoia
        )
    }
}
