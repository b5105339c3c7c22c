use std::io::{BufRead, Write};

use tracing::info;

use crate::{
    error::Result,
    session::{Reply, ResponseChooser, Session},
};

/// Line oriented front end.
/// Prints the intro, then one prefixed reply per input line until the session
/// closes or `input` runs out.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run<C: ResponseChooser>(&mut self, session: &mut Session<C>) -> Result<()> {
        writeln!(self.output, "{}", session.config().intro)?;
        self.output.flush()?;

        let mut turns = 0usize;
        let mut line = String::new();
        while !session.is_closed() {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let reply = session.respond(&line);
            if reply == Reply::Closed {
                break;
            }
            self.say(&session.config().bot_name, &reply)?;
            turns += 1;
        }
        info!(turns, closed = session.is_closed(), "console finished");
        Ok(())
    }

    fn say(&mut self, bot_name: &str, reply: &Reply) -> Result<()> {
        writeln!(self.output, "{bot_name}: {}", reply.text())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        analyzer::{Analyzer, IdentityLemmatizer},
        config::ChatConfig,
        corpus::Corpus,
        session::FirstChooser,
    };

    fn run(input: &str) -> String {
        let config = ChatConfig::default();
        let vectorizer = config.vectorizer(Analyzer::new(Arc::new(IdentityLemmatizer)));
        let mut session = Session::new(
            Corpus::from_sentences(["great sound quality", "shipping was slow"]),
            vectorizer,
            config,
            FirstChooser,
        );
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        console.run(&mut session).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn transcript() {
        let out = run("hi\nslow shipping?\nbye\ngreat\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                ChatConfig::default().intro.as_str(),
                "ChatterBox: hi",
                "ChatterBox: shipping was slow",
                "ChatterBox: Bye! ",
            ]
        );
    }

    #[test]
    fn stops_at_eof() {
        let out = run("xyzabc");
        assert!(out.ends_with("ChatterBox: I am sorry! I am not able to get you\n"));
    }
}
