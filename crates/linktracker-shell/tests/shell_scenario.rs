//! End-to-end runs of the link shell over in-memory streams.

use linktracker_service::hasher::MIN_COST;
use linktracker_service::{BcryptHasher, LinkService, LinkTracker};
use linktracker_shell::{ErrorKind, LinkHandlers, Shell, ShellError};
use linktracker_storage::InMemoryRepository;
use serde_json::Value;
use std::io::{self, Cursor};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

type Service = LinkTracker<InMemoryRepository, BcryptHasher>;

fn service() -> Arc<Service> {
    let hasher = BcryptHasher::with_cost(MIN_COST).unwrap();
    Arc::new(LinkTracker::new(InMemoryRepository::new(), hasher))
}

async fn run_lines<R>(service: &Arc<Service>, input: R) -> (Result<(), ShellError>, Vec<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut out = Vec::new();
    let mut shell = Shell::new(input, &mut out);
    LinkHandlers::from_arc(Arc::clone(service)).register(&mut shell);

    let result = shell.run().await;

    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}

async fn run_script(service: &Arc<Service>, script: &[&str]) -> Vec<String> {
    let input = Cursor::new(script.join("\n").into_bytes());
    let (result, lines) = run_lines(service, input).await;
    result.unwrap();
    lines
}

/// Reader that fails on every read.
struct Unplugged;

impl AsyncRead for Unplugged {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::other("device unplugged")))
    }
}

#[tokio::test]
async fn full_link_lifecycle() {
    let service = service();

    let lines = run_script(
        &service,
        &[
            "CREATE link:example.com password:secret",
            "REDIRECT id:1 password:secret",
            "METRICS id:1",
            "INACTIVATE id:1",
        ],
    )
    .await;

    assert_eq!(
        lines,
        vec![
            r#"{"id":1}"#,
            r#"{"msg":"Redirecting to:example.com"}"#,
            r#"{"id":1,"url":"example.com","count":1,"inactive":false}"#,
            r#"{"msg":"Link: 1 deleted"}"#,
        ]
    );

    let link = service.find_by_id(1).await.unwrap();
    assert!(link.inactive);
    assert_eq!(link.redirect_count, 1);
}

#[tokio::test]
async fn unknown_action_does_not_stop_the_loop() {
    let service = service();

    let lines = run_script(
        &service,
        &["CREATE link:example.com password:secret", "BOGUS", "METRICS id:1"],
    )
    .await;

    assert_eq!(lines.len(), 3);
    let created: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(created["id"], 1);
    assert!(serde_json::from_str::<Value>(&lines[1]).is_err());
    assert_eq!(lines[1], "could not handle input: handler not found");
    assert_eq!(
        lines[2],
        r#"{"id":1,"url":"example.com","count":0,"inactive":false}"#
    );
}

#[tokio::test]
async fn malformed_param_registers_nothing() {
    let service = service();

    let lines = run_script(
        &service,
        &["CREATE link-example.com", "CREATE link:example.com password:secret"],
    )
    .await;

    assert_eq!(lines[0], "could not handle param");
    // the rejected line consumed no identifier
    assert_eq!(lines[1], r#"{"id":1}"#);
}

#[tokio::test]
async fn domain_failures_are_reported_in_order() {
    let service = service();

    let lines = run_script(
        &service,
        &[
            "REDIRECT id:1 password:secret",
            "CREATE link:example.com password:secret",
            "REDIRECT id:1 password:wrong",
            "REDIRECT id:1",
            "METRICS id:one",
            "INACTIVATE id:2",
            "INACTIVATE id:1",
            "REDIRECT id:1 password:secret",
            "METRICS id:1",
        ],
    )
    .await;

    assert_eq!(
        lines,
        vec![
            "link not found",
            r#"{"id":1}"#,
            "authentication failed",
            "password is missing",
            "invalid id: one",
            "link not found",
            r#"{"msg":"Link: 1 deleted"}"#,
            "link is inactive",
            r#"{"id":1,"url":"example.com","count":0,"inactive":true}"#,
        ]
    );
}

#[tokio::test]
async fn counts_every_redirect() {
    let service = service();
    let mut script = vec!["CREATE link:example.com password:secret"];
    for _ in 0..5 {
        script.push("REDIRECT id:1 password:secret");
        script.push("METRICS id:1");
    }

    let lines = run_script(&service, &script).await;

    assert_eq!(lines.len(), 11);
    assert_eq!(
        lines[10],
        r#"{"id":1,"url":"example.com","count":5,"inactive":false}"#
    );
}

#[tokio::test]
async fn separate_shells_share_one_service() {
    let service = service();

    run_script(&service, &["CREATE link:example.com password:secret"]).await;
    let lines = run_script(&service, &["REDIRECT id:1 password:secret", "METRICS id:1"]).await;

    assert_eq!(
        lines[1],
        r#"{"id":1,"url":"example.com","count":1,"inactive":false}"#
    );
}

#[tokio::test]
async fn read_failure_is_fatal_after_answering_earlier_lines() {
    let service = service();
    let input = Cursor::new(b"CREATE link:example.com password:secret\n".to_vec()).chain(Unplugged);

    let (result, lines) = run_lines(&service, input).await;

    assert_eq!(lines, vec![r#"{"id":1}"#]);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FatalIo);
    assert!(err.to_string().contains("device unplugged"));
}
