//! Line-oriented user intents read from stdin.

use pledge_core::Msg;

pub const HELP: &str = "commands: n next | p previous | g <page> go to page | r <5|10|15|20> rows per page | l reload | d dismiss | q quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Send(Vec<Msg>),
    Help,
    Quit,
}

pub fn parse_intent(line: &str) -> Result<Intent, String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Intent::Help);
    };
    let argument = parts.collect::<Vec<_>>().join(" ");

    let msgs = match command {
        "n" | "next" => vec![Msg::NextClicked],
        "p" | "prev" => vec![Msg::PrevClicked],
        // The page input is sanitized by the core, like keystrokes in a text field.
        "g" | "goto" => vec![Msg::PageInputChanged(argument), Msg::PageInputSubmitted],
        "r" | "rows" => {
            let rows = argument
                .parse::<usize>()
                .map_err(|_| format!("rows per page must be a number, got {argument:?}"))?;
            vec![Msg::RowsPerPageSelected(rows)]
        }
        "l" | "reload" => vec![Msg::LoadRequested],
        "d" | "dismiss" => vec![Msg::NotificationDismissed],
        "h" | "help" | "?" => return Ok(Intent::Help),
        "q" | "quit" => return Ok(Intent::Quit),
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Intent::Send(msgs))
}
