use crate::error::{Result, ShellError};
use crate::handler::Handler;
use crate::request::{Context, Request, Response};
use std::collections::HashMap;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Number of lines the reader may have waiting for the dispatch loop.
/// With one slot the reader stays at most a line ahead.
pub const INPUT_BUFFER: usize = 1;

/// A command line split into its action and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub action: &'a str,
    pub params: HashMap<String, String>,
}

/// Tokenizes `ACTION key:value key:value ...`.
///
/// Tokens are separated by runs of whitespace. Every parameter token must
/// contain exactly one `:`; a repeated key keeps its last value.
pub fn parse_line(line: &str) -> Result<Command<'_>> {
    let mut fields = line.split_whitespace();
    let Some(action) = fields.next() else {
        return Err(ShellError::EmptyInput);
    };

    let mut params = HashMap::new();
    for field in fields {
        let mut parts = field.split(':');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ShellError::MalformedParam(field.to_string()));
        };
        params.insert(key.to_string(), value.to_string());
    }

    Ok(Command { action, params })
}

/// Line-oriented command server.
///
/// Handlers are registered by action name with [`Shell::add_handler`] before
/// calling [`Shell::run`]. During the run, a background task reads lines
/// from the input while the dispatch loop handles them one at a time, in
/// arrival order, writing exactly one output line per input line.
pub struct Shell<R, W> {
    input: R,
    output: W,
    handlers: Handlers,
}

impl<R, W> Shell<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            handlers: Handlers::default(),
        }
    }

    /// Registers `handler` for `action`, replacing any previous one.
    pub fn add_handler(&mut self, action: impl Into<String>, handler: impl Handler) {
        let action = action.into();
        debug!(action = %action, "registering handler");
        self.handlers.0.insert(action, Box::new(handler));
    }

    /// Runs until the input is exhausted.
    ///
    /// Command failures are written to the output and the loop moves on.
    /// Returns an error only when reading the input or writing the output
    /// fails.
    pub async fn run(self) -> Result<()> {
        let Shell {
            input,
            mut output,
            handlers,
        } = self;

        let (line_tx, mut lines) = mpsc::channel::<String>(INPUT_BUFFER);
        let (error_tx, mut errors) = mpsc::channel::<io::Error>(1);
        let root = CancellationToken::new();
        let _cancel_on_exit = root.clone().drop_guard();

        let reader = tokio::spawn(read_lines(input, line_tx, error_tx));
        info!("listening for instructions");

        let mut line_no = 0u64;
        let result = loop {
            // Lines come first so everything read before a failure is answered.
            tokio::select! {
                biased;
                line = lines.recv() => match line {
                    Some(line) => {
                        line_no += 1;
                        let ctx = Context::new(line_no, root.child_token());
                        let outcome = handlers.dispatch(ctx, &line).await;
                        if let Err(e) = write_outcome(&mut output, outcome).await {
                            break Err(e);
                        }
                    }
                    None => {
                        break match errors.recv().await {
                            Some(e) => Err(ShellError::Input(e)),
                            None => Ok(()),
                        };
                    }
                },
                Some(e) = errors.recv() => break Err(ShellError::Input(e)),
            }
        };

        reader.abort();
        match &result {
            Ok(()) => info!(lines = line_no, "input exhausted, shutting down"),
            Err(e) => error!(lines = line_no, error = %e, "shell stopped"),
        }
        result
    }
}

#[derive(Default)]
struct Handlers(HashMap<String, Box<dyn Handler>>);

impl Handlers {
    async fn dispatch(&self, ctx: Context, line: &str) -> Result<Response> {
        let command = parse_line(line)?;
        debug!(line = ctx.line(), action = command.action, "dispatching command");

        let Some(handler) = self.0.get(command.action) else {
            return Err(ShellError::HandlerNotFound(command.action.to_string()));
        };

        handler
            .handle(Request::new(ctx, command.action, command.params))
            .await
    }
}

async fn write_outcome<W>(output: &mut W, outcome: Result<Response>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = match outcome {
        Ok(response) => response.to_line(),
        Err(e) => {
            debug!(kind = ?e.kind(), error = %e, "command failed");
            e.to_string()
        }
    };
    line.push('\n');

    output
        .write_all(line.as_bytes())
        .await
        .map_err(ShellError::Output)?;
    output.flush().await.map_err(ShellError::Output)
}

/// Forwards input lines until end of input or a read failure.
///
/// Lines are split on `\n` with a trailing `\r` dropped. Bytes that are not
/// valid UTF-8 are replaced rather than treated as a stream failure, so such
/// a line is answered like any other unparseable command.
async fn read_lines<R>(input: R, lines: mpsc::Sender<String>, errors: mpsc::Sender<io::Error>)
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(input).split(b'\n');
    loop {
        match segments.next_segment().await {
            Ok(Some(mut bytes)) => {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                let line = String::from_utf8_lossy(&bytes).into_owned();
                if lines.send(line).await.is_err() {
                    return;
                }
            }
            Ok(None) => return,
            Err(e) => {
                let _ = errors.send(e).await;
                return;
            }
        }
    }
}
