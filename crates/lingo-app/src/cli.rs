use clap::{Args, Parser, Subcommand};
use lingo_types::{ContentKind, Difficulty, ExerciseKind};

#[derive(Parser)]
#[command(author, version, about = "AI-assisted vocabulary and practice for language learners")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Sign in to the account backend with this email
    #[arg(long, global = true, requires = "password")]
    pub email: Option<String>,

    #[arg(long, global = true, requires = "email")]
    pub password: Option<String>,

    /// Generation model (gemini-2.5-flash or gemini-2.5-pro)
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

impl Cli {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Show or edit the learner profile
    Profile {
        #[command(subcommand)]
        action: ProfileCmd,
    },
    /// Manage the word book
    Words {
        #[command(subcommand)]
        action: WordsCmd,
    },
    /// Translation, explanation and examples for a word
    Lookup {
        word: String,
        /// Language of the word (defaults to the first learning language)
        #[arg(long)]
        language: Option<String>,
        /// Save the result to the word book
        #[arg(long)]
        save: bool,
    },
    /// Generated vocabulary, sentences or a grammar lesson on a topic
    Learn {
        #[command(flatten)]
        topic: TopicArgs,
        #[arg(long, default_value = "vocabulary")]
        kind: ContentKind,
        /// Save generated vocabulary to the word book
        #[arg(long)]
        save: bool,
    },
    /// Vocabulary list as a lesson
    Lesson {
        #[command(flatten)]
        topic: TopicArgs,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Translate a sentence, with word-by-word analysis unless --plain
    Translate {
        sentence: String,
        #[arg(long)]
        from: String,
        /// Target language (defaults to the teaching language)
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        plain: bool,
    },
    /// Interactive exercises; answers are read from stdin
    Practice {
        #[command(flatten)]
        topic: TopicArgs,
        #[arg(long, default_value = "translation")]
        kind: ExerciseKind,
    },
    /// Practice history
    History {
        #[command(subcommand)]
        action: HistoryCmd,
    },
    /// Ask the tutor a question
    Tutor {
        message: String,
        #[arg(long)]
        language: Option<String>,
    },
    /// Create an account (from --email/--password) and its profile
    Signup,
}

#[derive(Args)]
pub struct TopicArgs {
    #[arg(long)]
    pub topic: String,
    #[arg(long, default_value = "beginner")]
    pub level: Difficulty,
    /// Learning language (defaults to the first learning language)
    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    Show,
    /// Interface language used for explanations
    SetTeaching { code: String },
    AddLearning { code: String },
    RemoveLearning { code: String },
    Rename { name: String },
}

#[derive(Subcommand)]
pub enum WordsCmd {
    Add {
        text: String,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        explanation: Option<String>,
        /// May be repeated
        #[arg(long = "example")]
        examples: Vec<String>,
    },
    List {
        #[arg(long)]
        language: Option<String>,
        /// List the account word book instead of the local one
        #[arg(long)]
        remote: bool,
    },
    Search { query: String },
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Words due for review
    Review,
    /// Mark a word as reviewed
    Mark { id: String },
    Remove { id: String },
    Clear,
}

#[derive(Subcommand)]
pub enum HistoryCmd {
    List,
    Remove { id: String },
}
