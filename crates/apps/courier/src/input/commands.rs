//! Terminal command parsing
//!
//! One line of stdin maps to one command. Arguments that may contain
//! spaces come last; optional fields are separated with `|`.

/// An operator action entered on the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Conversations
    ShowList,
    Filter(String),
    Open(usize),
    Send(String),
    NewConversation {
        phone_numbers: String,
        contact_name: Option<String>,
        initial_message: Option<String>,
    },
    ShowThread,

    // Bulk composer
    ToggleBulk,
    SearchSheets(String),
    SelectSheet(Option<String>),
    Template(String),
    InsertPlaceholder(String),
    SendBulk,

    // Settings
    Twilio {
        account_sid: String,
        auth_token: String,
        phone_number: String,
    },
    ImportHistory { confirmed: bool },
    Recalculate,
    ApplyContacts(String),

    Help,
    Quit,
}

/// Parse one input line; `Err` carries a usage hint
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "list" | "ls" => Command::ShowList,
        "filter" | "/" => Command::Filter(rest.to_string()),
        "open" => {
            let position: usize = rest
                .parse()
                .map_err(|_| "usage: open <number>".to_string())?;
            if position == 0 {
                return Err("conversations are numbered from 1".to_string());
            }
            Command::Open(position - 1)
        }
        "send" | "say" => Command::Send(rest.to_string()),
        "new" => {
            let mut fields = rest.split('|').map(str::trim);
            let phone_numbers = fields.next().unwrap_or_default();
            if phone_numbers.is_empty() {
                return Err("usage: new <phones,comma,separated> [| name [| message]]".to_string());
            }
            Command::NewConversation {
                phone_numbers: phone_numbers.to_string(),
                contact_name: fields.next().filter(|s| !s.is_empty()).map(str::to_string),
                initial_message: fields.next().filter(|s| !s.is_empty()).map(str::to_string),
            }
        }
        "thread" => Command::ShowThread,
        "bulk" => match rest {
            "" => Command::ToggleBulk,
            "send" => Command::SendBulk,
            _ => return Err("usage: bulk [send]".to_string()),
        },
        "sheets" => Command::SearchSheets(rest.to_string()),
        "sheet" => Command::SelectSheet(Some(rest.to_string()).filter(|id| !id.is_empty())),
        "template" => Command::Template(rest.to_string()),
        "insert" => {
            if rest.is_empty() {
                return Err("usage: insert <column header>".to_string());
            }
            Command::InsertPlaceholder(rest.to_string())
        }
        "twilio" => {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            match fields.as_slice() {
                [sid, token, phone] => Command::Twilio {
                    account_sid: sid.to_string(),
                    auth_token: token.to_string(),
                    phone_number: phone.to_string(),
                },
                _ => return Err("usage: twilio <account_sid> <auth_token> <phone_number>".to_string()),
            }
        }
        "import" => Command::ImportHistory {
            confirmed: matches!(rest, "yes" | "y"),
        },
        "recalc" => Command::Recalculate,
        "contacts" => Command::ApplyContacts(rest.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(command)
}
