//! Command reference shown by `help`

/// A group of commands for display
pub struct CommandCategory {
    pub name: &'static str,
    pub commands: Vec<CommandHelp>,
}

/// A single command for display
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

fn cmd(usage: &'static str, description: &'static str) -> CommandHelp {
    CommandHelp { usage, description }
}

pub fn categories() -> Vec<CommandCategory> {
    vec![
        CommandCategory {
            name: "Conversations",
            commands: vec![
                cmd("list", "Show the conversation list"),
                cmd("filter <text>", "Filter by contact or last message"),
                cmd("open <n>", "Open the n-th visible conversation"),
                cmd("thread", "Show the open thread"),
                cmd("send <text>", "Send a message to the open conversation"),
                cmd("new <phones> [| name [| message]]", "Start conversations"),
            ],
        },
        CommandCategory {
            name: "Bulk SMS",
            commands: vec![
                cmd("bulk", "Open or close the bulk composer"),
                cmd("sheets [search]", "Search Google Sheets"),
                cmd("sheet [id]", "Select a sheet, or clear the selection"),
                cmd("template <text>", "Set the message template"),
                cmd("insert <column>", "Append a {{column}} placeholder"),
                cmd("bulk send", "Send the template to every row"),
            ],
        },
        CommandCategory {
            name: "Settings",
            commands: vec![
                cmd("twilio <sid> <token> <phone>", "Save Twilio credentials"),
                cmd("import yes", "Import message history from Twilio"),
                cmd("recalc", "Recalculate last activity times"),
                cmd("contacts <json>", "Apply contact names from sheet JSON"),
            ],
        },
        CommandCategory {
            name: "General",
            commands: vec![cmd("help", "Show this help"), cmd("quit", "Exit")],
        },
    ]
}

/// Help text as printable lines
pub fn lines() -> Vec<String> {
    let mut lines = Vec::new();
    for category in categories() {
        lines.push(format!("{}:", category.name));
        for command in category.commands {
            lines.push(format!("  {:<36} {}", command.usage, command.description));
        }
    }
    lines
}
