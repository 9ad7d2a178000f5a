//! Declarative command routing.
//!
//! Operator messages are matched against an ordered table of
//! `(matcher, command)` pairs with first-match-wins semantics. The router is
//! data, not branching code — adding a command is a table edit. Order
//! matters: specific matchers (`/techy`, `/dog`, `/duck`) must precede the
//! greedy one-letter prefixes `/t` and `/d`.

use hermit_fetch::FetchKind;

/// How a command is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Whole-text equality.
    Exact(&'static str),
    /// Leading prefix; the remainder (trimmed) becomes the argument string.
    Prefix(&'static str),
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Exact(s) => text == *s,
            Matcher::Prefix(s) => text.starts_with(s),
        }
    }

    /// Argument portion of a matched text.
    pub fn args<'a>(&self, text: &'a str) -> &'a str {
        match self {
            Matcher::Exact(_) => "",
            Matcher::Prefix(s) => text[s.len()..].trim(),
        }
    }
}

/// Every operator command the runtime knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enable automated replies for the current conversation.
    Start,
    /// Disable automated replies for the current conversation.
    Stop,
    /// `/schedule <timestamp> <text>` — deferred one-shot send.
    Schedule,
    /// Append the quoted message to the saved-messages file.
    Save,
    /// Send the saved-messages file contents.
    ListSaves,
    /// Remove the saved-messages file.
    ClearSaves,
    /// `/poll <a, b, …>` — single-select poll from comma-separated options.
    Poll,
    /// `/eli5 <topic>` — one-shot explanation via the reply generator.
    Eli5,
    /// Fetch-and-forward from one external source.
    Fetch(FetchKind),
}

pub struct CommandSpec {
    pub matcher: Matcher,
    pub command: Command,
}

const fn spec(matcher: Matcher, command: Command) -> CommandSpec {
    CommandSpec { matcher, command }
}

/// The ordered routing table. First match wins.
pub static COMMAND_TABLE: &[CommandSpec] = &[
    spec(Matcher::Exact("/stop"), Command::Stop),
    spec(Matcher::Exact("/start"), Command::Start),
    spec(Matcher::Prefix("/rizz"), Command::Fetch(FetchKind::Pickup)),
    spec(Matcher::Prefix("/insult"), Command::Fetch(FetchKind::Insult)),
    spec(Matcher::Exact("/cat"), Command::Fetch(FetchKind::Cat)),
    spec(Matcher::Exact("/dog"), Command::Fetch(FetchKind::Dog)),
    spec(Matcher::Exact("/catfact"), Command::Fetch(FetchKind::CatFact)),
    spec(Matcher::Exact("/joke"), Command::Fetch(FetchKind::Joke)),
    spec(Matcher::Exact("/duck"), Command::Fetch(FetchKind::Duck)),
    spec(Matcher::Exact("/fox"), Command::Fetch(FetchKind::Fox)),
    spec(Matcher::Exact("/neko"), Command::Fetch(FetchKind::Neko)),
    spec(Matcher::Exact("/colormind"), Command::Fetch(FetchKind::Palette)),
    spec(
        Matcher::Exact("/chucknorris"),
        Command::Fetch(FetchKind::ChuckNorris),
    ),
    spec(Matcher::Exact("/buzz"), Command::Fetch(FetchKind::Buzzword)),
    spec(
        Matcher::Exact("/uselessfact"),
        Command::Fetch(FetchKind::UselessFact),
    ),
    spec(Matcher::Exact("/techy"), Command::Fetch(FetchKind::Techy)),
    // Greedy one-letter prefixes. Everything starting with /t or /d that is
    // not caught above lands here.
    spec(Matcher::Prefix("/t"), Command::Fetch(FetchKind::Truth)),
    spec(Matcher::Prefix("/d"), Command::Fetch(FetchKind::Dare)),
    spec(
        Matcher::Prefix("/wyr"),
        Command::Fetch(FetchKind::WouldYouRather),
    ),
    spec(
        Matcher::Prefix("/nhie"),
        Command::Fetch(FetchKind::NeverHaveIEver),
    ),
    spec(
        Matcher::Prefix("/paranoia"),
        Command::Fetch(FetchKind::Paranoia),
    ),
    spec(Matcher::Prefix("/eli5"), Command::Eli5),
    spec(Matcher::Prefix("/poll"), Command::Poll),
    spec(Matcher::Exact("/save"), Command::Save),
    spec(Matcher::Exact("/saves"), Command::ListSaves),
    spec(Matcher::Exact("/clearsaves"), Command::ClearSaves),
    spec(Matcher::Prefix("/schedule"), Command::Schedule),
];

/// Match `text` against the table. Returns the winning spec and the argument
/// remainder, or `None` when the text is not a command.
pub fn route(text: &str) -> Option<(&'static CommandSpec, &str)> {
    COMMAND_TABLE
        .iter()
        .find(|spec| spec.matcher.matches(text))
        .map(|spec| (spec, spec.matcher.args(text)))
}
