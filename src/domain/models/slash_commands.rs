#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
    remainder: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let mut remainder = "";
        if let Some((_, after)) = text.trim_start().split_once(' ') {
            remainder = after.trim_start();
        }

        let cmd = SlashCommand {
            command: prefix,
            args,
            remainder: remainder.to_string(),
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_index()
            || cmd.is_path()
            || cmd.is_llm()
            || cmd.is_rerank()
            || cmd.is_settings()
            || cmd.is_clear()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything typed after the command, untouched apart from the spaces
    /// separating it from the command. Paths keep their inner and trailing
    /// whitespace.
    pub fn rest(&self) -> String {
        return self.remainder.to_string();
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_index(&self) -> bool {
        return ["/i", "/index"].contains(&self.command.as_str());
    }

    pub fn is_path(&self) -> bool {
        return ["/p", "/path"].contains(&self.command.as_str());
    }

    pub fn is_llm(&self) -> bool {
        return ["/l", "/llm"].contains(&self.command.as_str());
    }

    pub fn is_rerank(&self) -> bool {
        return ["/r", "/rerank"].contains(&self.command.as_str());
    }

    pub fn is_settings(&self) -> bool {
        return ["/s", "/settings"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/c", "/clear"].contains(&self.command.as_str());
    }
}
