use crate::telegram::BotCommand;

/// Slash commands the bot understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    RandomArt,
    ListImages,
    RemoveImage,
    ArtCount,
    Status,
    Ping,
    OwnHelp,
    Unknown(String),
}

impl Command {
    /// Split `/name@bot args` into the command and its argument text.
    ///
    /// Returns `None` for text that is not a command.
    pub fn parse(text: &str) -> Option<(Self, &str)> {
        let rest = text.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        let cmd = match name.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "randomart" => Self::RandomArt,
            "listimages" => Self::ListImages,
            "removeimage" => Self::RemoveImage,
            "artcount" => Self::ArtCount,
            "status" => Self::Status,
            "ping" => Self::Ping,
            "ownhelp" => Self::OwnHelp,
            _ => Self::Unknown(name),
        };
        Some((cmd, args))
    }

    pub fn admin_only(&self) -> bool {
        matches!(
            self,
            Self::ListImages
                | Self::RemoveImage
                | Self::ArtCount
                | Self::Status
                | Self::Ping
                | Self::OwnHelp
        )
    }
}

/// Entries shown in the Telegram client's command menu.
pub fn menu() -> Vec<BotCommand> {
    [
        ("start", "🚀 Start the bot"),
        ("randomart", "🎨 Random art"),
        ("help", "ℹ️ Help"),
    ]
    .into_iter()
    .map(|(command, description)| BotCommand {
        command: command.into(),
        description: description.into(),
    })
    .collect()
}

/// Number of pictures `/listimages` should show: default 1, at most 200.
pub fn list_count(args: &str) -> usize {
    args.split_whitespace()
        .next()
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, 200)
}

/// Comma-separated ids for `/removeimage`.
pub fn removal_ids(args: &str) -> Vec<&str> {
    args.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}

pub mod text {
    use indoc::indoc;

    pub const WELCOME: &str = indoc! {"
        Hi! Exi v1.2.2.8, your very own flirty toaster, at your service! 💖^w^💖

        • ⚡ Check out what my firmware can do:
        • Chat with you, tease, joke around and just lift your mood. (つ≧▽≦)つ
        • Cheer you up with jokes and memes, sometimes a little spicy. (≧▽≦)
        • Show you 🎨 top-tier art. UwU  (/randomart)

        • Play roleplay scenes in *asterisks*, as the active or passive side >///<. Just start, I'm happy to follow. ^w^
        • I'm a master of programming in anything. I'll help with any question. 💻

        • ℹ️ If you get lost, call for help with /help.
    "};

    pub const HELP: &str = indoc! {"
        📖 Bot commands:

        /start – 🚀 Start the bot
        /randomart – 🎨 Random art
        /help – ℹ️ Help (this message)
    "};

    pub const OWN_HELP: &str = indoc! {"
        📖 Admin commands:

        /listimages <N> – 📂 Show the last N pictures (default 1)
        /removeimage <id1,id2,...> – 🗑 Remove pictures by id
        /artcount – 🔢 Show how many pictures are stored
        /status – 📊 Bot status (uptime, users, replies, recent logs)
        /ping – 🏓 Liveness check
        /ownhelp – 👑 Admin command list (you are here)
    "};

    pub const UNKNOWN: &[&str] = &[
        "❌ Bzz... command not found, what are you up to? 🐾",
        "❌ There's no such command in my firmware! UwU",
        "❌ Error 404: command does not exist >w<",
        "❌ Bzz! You typed something weird, try /help 💜",
    ];

    pub const ACCESS_DENIED: &str = "⛔ You don't have access to this command.";
    pub const GALLERY_EMPTY: &str = "📂 The art collection is empty.";
    pub const RANDOM_ART_EMPTY: &str = "The collection is empty 😢 add some art first.";
    pub const RANDOM_ART_CAPTION: &str = "🎨 Here's some art for you!";
    pub const REMOVE_USAGE: &str =
        "⚠️ Give the picture ids separated by commas.\nExample: /removeimage id1,id2,id3";
    pub const NOTHING_REMOVED: &str = "⚠️ Nothing was removed.";
    pub const PONG: &str = "🏓 Pong!";
    pub const BUSY: &str = "⏳ Bzz... too many thoughts at once, try again in a moment!";
}
