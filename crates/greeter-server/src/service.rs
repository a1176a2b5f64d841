//! gRPC service implementation for the greeter.
//!
//! [`GreeterService`] implements the generated `Greeter` trait by decoding
//! each wire message into its `greeter-core` counterpart, running the
//! matching handler, and encoding the result. The bidirectional stream runs
//! the same say-hello pipeline per inbound item, preserving request order.

use std::pin::Pin;
use std::sync::Arc;

use greeter_core::{Clock, GreeterHandler, ServerStats, SystemClock};
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream};
use tonic::{Request, Response, Status, Streaming};

use crate::error::into_status;
use crate::proto;

impl From<proto::GreetRequest> for greeter_core::GreetRequest {
    fn from(msg: proto::GreetRequest) -> Self {
        Self {
            name: msg.name,
            greeting_style: msg.greeting_style,
            include_time_greeting: msg.include_time_greeting.unwrap_or(false),
            user_category: msg.user_category,
        }
    }
}

impl From<proto::GoodbyeRequest> for greeter_core::GoodbyeRequest {
    fn from(msg: proto::GoodbyeRequest) -> Self {
        Self {
            name: msg.name,
            farewell_style: msg.farewell_style,
        }
    }
}

impl From<greeter_core::GreetReply> for proto::GreetReply {
    fn from(reply: greeter_core::GreetReply) -> Self {
        Self {
            message: reply.message,
            processing_time_ms: reply.processing_time_ms,
            server_timestamp: reply.server_timestamp,
            time_of_day_phrase: reply.time_of_day_phrase,
            is_admin: reply.is_admin,
        }
    }
}

impl From<greeter_core::ServerInfo> for proto::ServerInfoReply {
    fn from(info: greeter_core::ServerInfo) -> Self {
        Self {
            uptime_seconds: info.uptime_seconds,
            total_requests: info.total_requests,
            average_latency_ms: info.average_latency_ms,
            server_timestamp: info.server_timestamp,
        }
    }
}

impl From<greeter_core::UserReport> for proto::ValidateUserReply {
    fn from(report: greeter_core::UserReport) -> Self {
        Self {
            is_valid: report.is_valid,
            errors: report.errors,
            user_category: report.category.as_str().to_string(),
        }
    }
}

/// The greeter service exposed over tonic.
#[derive(Debug)]
pub struct GreeterService<C = SystemClock> {
    handler: Arc<GreeterHandler<C>>,
    stream_buffer: usize,
}

impl<C: Clock> GreeterService<C> {
    /// Build the service around an explicitly constructed stats instance.
    /// The same `Arc` can be shared with anything else observing the
    /// counters.
    pub fn new(stats: Arc<ServerStats>, clock: C, stream_buffer: usize) -> Self {
        Self {
            handler: Arc::new(GreeterHandler::new(stats, clock)),
            stream_buffer: stream_buffer.max(1),
        }
    }
}

impl<C> Clone for GreeterService<C> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            stream_buffer: self.stream_buffer,
        }
    }
}

#[tonic::async_trait]
impl<C: Clock> proto::greeter_server::Greeter for GreeterService<C> {
    async fn say_hello(
        &self,
        request: Request<proto::GreetRequest>,
    ) -> Result<Response<proto::GreetReply>, Status> {
        let req = greeter_core::GreetRequest::from(request.into_inner());
        let reply = self.handler.say_hello(&req).map_err(into_status)?;
        Ok(Response::new(reply.into()))
    }

    async fn say_goodbye(
        &self,
        request: Request<proto::GoodbyeRequest>,
    ) -> Result<Response<proto::GreetReply>, Status> {
        let req = greeter_core::GoodbyeRequest::from(request.into_inner());
        let reply = self.handler.say_goodbye(&req).map_err(into_status)?;
        Ok(Response::new(reply.into()))
    }

    async fn get_server_info(
        &self,
        _request: Request<proto::ServerInfoRequest>,
    ) -> Result<Response<proto::ServerInfoReply>, Status> {
        Ok(Response::new(self.handler.server_info().into()))
    }

    async fn validate_user(
        &self,
        request: Request<proto::ValidateUserRequest>,
    ) -> Result<Response<proto::ValidateUserReply>, Status> {
        let name = request.into_inner().name;
        Ok(Response::new(self.handler.validate_user(&name).into()))
    }

    type SayHelloStreamStream = Pin<Box<dyn Stream<Item = Result<proto::GreetReply, Status>> + Send>>;

    /// Bidirectional greeting stream: one reply per request, in request
    /// order. The inbound side is drained by a spawned pump task; replies
    /// flow back through a bounded channel, so a slow client applies
    /// backpressure to the pump rather than to the transport.
    ///
    /// An invalid item ends the stream: its rejection becomes the stream
    /// error, since a response stream terminates at the first error anyway
    /// and the reply message has no field for an in-band rejection.
    async fn say_hello_stream(
        &self,
        request: Request<Streaming<proto::GreetRequest>>,
    ) -> Result<Response<Self::SayHelloStreamStream>, Status> {
        let mut inbound = request.into_inner();
        let (tx, rx) = mpsc::channel(self.stream_buffer);
        let handler = Arc::clone(&self.handler);

        tokio::spawn(async move {
            loop {
                let item = tokio::select! {
                    biased;
                    // Receiver dropped: the call was cancelled. Stop without
                    // reading or recording anything further.
                    _ = tx.closed() => {
                        tracing::debug!("greeting stream cancelled by client");
                        break;
                    }
                    msg = inbound.message() => match msg {
                        Ok(Some(msg)) => msg,
                        // End of input: dropping tx closes the outbound channel.
                        Ok(None) => break,
                        Err(status) => {
                            let _ = tx.send(Err(status)).await;
                            break;
                        }
                    },
                };

                // The read and the close can become ready together; the item
                // must not reach the handler once the call is cancelled.
                if tx.is_closed() {
                    tracing::debug!("greeting stream cancelled by client");
                    break;
                }

                let result = handler
                    .say_hello(&item.into())
                    .map(proto::GreetReply::from)
                    .map_err(into_status);
                let terminal = result.is_err();

                if tx.send(result).await.is_err() {
                    break;
                }
                if terminal {
                    break;
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::greeter_client::GreeterClient;
    use crate::proto::greeter_server::GreeterServer;
    use chrono::{TimeZone, Utc};
    use greeter_core::FixedClock;
    use tonic::Code;

    type TestClient = GreeterClient<GreeterServer<GreeterService<FixedClock>>>;

    /// In-process client wired straight onto the server service, no socket.
    fn client_at_hour(hour: u32) -> (TestClient, Arc<ServerStats>) {
        let stats = Arc::new(ServerStats::new());
        let now = Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap();
        let service = GreeterService::new(Arc::clone(&stats), FixedClock(now), 16);
        (GreeterClient::new(GreeterServer::new(service)), stats)
    }

    fn named(name: &str) -> proto::GreetRequest {
        proto::GreetRequest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn say_hello_end_to_end() {
        let (mut client, stats) = client_at_hour(10);

        let reply = client
            .say_hello(proto::GreetRequest {
                name: "Bob".into(),
                greeting_style: Some("Hi".into()),
                include_time_greeting: Some(false),
                user_category: None,
            })
            .await
            .unwrap()
            .into_inner();

        assert!(reply.message.starts_with("Hi, Bob!"), "got {:?}", reply.message);
        assert!(!reply.is_admin);
        assert!(reply.time_of_day_phrase.is_empty());
        assert_eq!(stats.snapshot().total_requests, 1);
    }

    #[tokio::test]
    async fn say_hello_rejects_empty_name() {
        let (mut client, stats) = client_at_hour(10);

        let status = client.say_hello(named("")).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(!status.message().is_empty());
        assert_eq!(stats.snapshot().total_requests, 0);
    }

    #[tokio::test]
    async fn say_hello_appends_time_greeting() {
        let (mut client, _stats) = client_at_hour(9);

        let reply = client
            .say_hello(proto::GreetRequest {
                name: "Bob".into(),
                include_time_greeting: Some(true),
                ..Default::default()
            })
            .await
            .unwrap()
            .into_inner();

        assert_eq!(reply.time_of_day_phrase, "Good morning!");
        assert!(reply.message.ends_with("Good morning!"));
    }

    #[tokio::test]
    async fn say_goodbye_end_to_end() {
        let (mut client, stats) = client_at_hour(10);

        let reply = client
            .say_goodbye(proto::GoodbyeRequest {
                name: "Bob".into(),
                farewell_style: None,
            })
            .await
            .unwrap()
            .into_inner();

        assert!(reply.message.starts_with("Goodbye, Bob."), "got {:?}", reply.message);
        assert_eq!(stats.snapshot().total_requests, 1);
    }

    #[tokio::test]
    async fn validate_user_never_rejects() {
        let (mut client, _stats) = client_at_hour(10);

        let reply = client
            .validate_user(proto::ValidateUserRequest { name: "Test99".into() })
            .await
            .unwrap()
            .into_inner();
        assert!(reply.is_valid);
        assert_eq!(reply.user_category, "test");

        // An invalid name still comes back as a normal reply.
        let reply = client
            .validate_user(proto::ValidateUserRequest { name: "".into() })
            .await
            .unwrap()
            .into_inner();
        assert!(!reply.is_valid);
        assert!(!reply.errors.is_empty());
        assert_eq!(reply.user_category, "unspecified");
    }

    #[tokio::test]
    async fn server_info_reports_counters() {
        let (mut client, _stats) = client_at_hour(10);

        client.say_hello(named("Bob")).await.unwrap();
        client.say_hello(named("alice")).await.unwrap();

        let info = client
            .get_server_info(proto::ServerInfoRequest {})
            .await
            .unwrap()
            .into_inner();

        assert_eq!(info.total_requests, 2);
        assert!(info.average_latency_ms >= 0.0);
        assert!(info.server_timestamp.starts_with("2024-06-15T10"));
    }

    #[tokio::test]
    async fn stream_replies_in_request_order() {
        let (mut client, stats) = client_at_hour(10);

        let requests = tokio_stream::iter(vec![named("Alice"), named("Bob"), named("Carol")]);
        let mut replies = client
            .say_hello_stream(requests)
            .await
            .unwrap()
            .into_inner();

        let mut messages = Vec::new();
        while let Some(reply) = replies.message().await.unwrap() {
            messages.push(reply.message);
        }

        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("Alice"));
        assert!(messages[1].contains("Bob"));
        assert!(messages[2].contains("Carol"));
        assert_eq!(stats.snapshot().total_requests, 3);
    }

    #[tokio::test]
    async fn invalid_item_ends_the_stream() {
        let (mut client, stats) = client_at_hour(10);

        let requests = tokio_stream::iter(vec![named("Alice"), named(""), named("Carol")]);
        let mut replies = client
            .say_hello_stream(requests)
            .await
            .unwrap()
            .into_inner();

        let first = replies.message().await.unwrap().unwrap();
        assert!(first.message.contains("Alice"));

        let err = replies.message().await.unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);

        // Only the valid item before the rejection was served.
        assert_eq!(stats.snapshot().total_requests, 1);
    }

    #[tokio::test]
    async fn cancelled_stream_stops_recording_stats() {
        let (mut client, stats) = client_at_hour(10);

        // Channel-backed request stream so items can be fed after the call
        // is already cancelled.
        let (req_tx, req_rx) = mpsc::channel(4);
        req_tx.send(named("Alice")).await.unwrap();

        let mut replies = client
            .say_hello_stream(ReceiverStream::new(req_rx))
            .await
            .unwrap()
            .into_inner();

        let first = replies.message().await.unwrap().unwrap();
        assert!(first.message.contains("Alice"));
        assert_eq!(stats.snapshot().total_requests, 1);

        // Cancel the call, then offer another item.
        drop(replies);
        req_tx.send(named("Bob")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert_eq!(
            stats.snapshot().total_requests,
            1,
            "no request may be served after cancellation"
        );
    }

    #[tokio::test]
    async fn empty_stream_closes_cleanly() {
        let (mut client, _stats) = client_at_hour(10);

        let requests = tokio_stream::iter(Vec::<proto::GreetRequest>::new());
        let mut replies = client
            .say_hello_stream(requests)
            .await
            .unwrap()
            .into_inner();

        assert!(replies.message().await.unwrap().is_none());
    }
}
