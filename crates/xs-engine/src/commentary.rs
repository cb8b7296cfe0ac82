//! Commentary seam: best-effort hype line after a win
//!
//! Requests are fire-and-forget. The service answers on a reply channel
//! whenever it is ready and the room polls that channel from `tick`. A reply
//! still missing when the RESULT dwell ends, an error reply, or a dropped
//! channel is logged and replaced by a static line.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommentaryError {
    #[error("Commentary service unavailable: {0}")]
    Unavailable(String),

    #[error("Commentary request timed out")]
    Timeout,
}

pub type CommentaryReply = Result<String, CommentaryError>;

/// What the service is asked to comment on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryRequest {
    pub winner_name: String,
    pub amount: u64,
    pub player_count: usize,
}

/// External commentary collaborator
pub trait CommentaryService: Send {
    /// Start a request and return at once. The reply goes to `reply`
    /// from whatever thread or later call produces it.
    fn request_commentary(&mut self, request: CommentaryRequest, reply: Sender<CommentaryReply>);
}

/// Offline commentary built from templates
#[derive(Debug, Clone, Default)]
pub struct TemplateCommentary;

impl TemplateCommentary {
    fn line(request: &CommentaryRequest) -> String {
        let CommentaryRequest {
            winner_name,
            amount,
            player_count,
        } = request;
        if *amount >= 5_000 {
            format!("{winner_name} just cleaned out the whole table: ${amount}!")
        } else if *player_count > 1 {
            format!("{winner_name} beat {} rivals for ${amount}.", player_count - 1)
        } else {
            format!("{winner_name} takes ${amount} off the wheel.")
        }
    }
}

impl CommentaryService for TemplateCommentary {
    fn request_commentary(&mut self, request: CommentaryRequest, reply: Sender<CommentaryReply>) {
        if reply.send(Ok(Self::line(&request))).is_err() {
            log::debug!("commentary: reply dropped for {}", request.winner_name);
        }
    }
}

/// Line used when the service cannot answer
pub fn fallback_line(winner_name: &str, amount: u64) -> String {
    format!("Winner: {winner_name} (+${amount})")
}

/// One in-flight request
#[derive(Debug)]
pub struct PendingCommentary {
    request: CommentaryRequest,
    reply: Receiver<CommentaryReply>,
}

impl PendingCommentary {
    pub fn dispatch(service: &mut dyn CommentaryService, request: CommentaryRequest) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        service.request_commentary(request.clone(), tx);
        Self { request, reply: rx }
    }

    /// (text, is_fallback) once the reply is in; None while still waiting
    pub fn poll(&self) -> Option<(String, bool)> {
        match self.reply.try_recv() {
            Ok(Ok(text)) => Some((text, false)),
            Ok(Err(e)) => Some(self.fallback(&e)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(self.fallback(&CommentaryError::Unavailable("reply channel closed".into())))
            }
        }
    }

    /// Stop waiting; a reply that made it in is still used
    pub fn expire(self) -> (String, bool) {
        self.poll()
            .unwrap_or_else(|| self.fallback(&CommentaryError::Timeout))
    }

    fn fallback(&self, error: &CommentaryError) -> (String, bool) {
        log::warn!("commentary: {error}, using fallback");
        (fallback_line(&self.request.winner_name, self.request.amount), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: u64, player_count: usize) -> CommentaryRequest {
        CommentaryRequest {
            winner_name: "Neo".into(),
            amount,
            player_count,
        }
    }

    struct Offline;

    impl CommentaryService for Offline {
        fn request_commentary(&mut self, _request: CommentaryRequest, reply: Sender<CommentaryReply>) {
            reply
                .send(Err(CommentaryError::Unavailable("no network".into())))
                .unwrap();
        }
    }

    /// Keeps the reply sender without answering
    #[derive(Default)]
    struct Stalled(Vec<Sender<CommentaryReply>>);

    impl CommentaryService for Stalled {
        fn request_commentary(&mut self, _request: CommentaryRequest, reply: Sender<CommentaryReply>) {
            self.0.push(reply);
        }
    }

    #[test]
    fn test_fallback_on_failure() {
        let pending = PendingCommentary::dispatch(&mut Offline, request(1500, 15));
        let (text, fallback) = pending.poll().unwrap();
        assert!(fallback);
        assert!(text.contains("Neo"));
        assert!(text.contains("1500"));
    }

    #[test]
    fn test_template_commentary() {
        let pending = PendingCommentary::dispatch(&mut TemplateCommentary, request(100, 3));
        let (text, fallback) = pending.poll().unwrap();
        assert!(!fallback);
        assert!(text.contains("2 rivals"));
    }

    #[test]
    fn test_stalled_service_expires_to_fallback() {
        let mut service = Stalled::default();
        let pending = PendingCommentary::dispatch(&mut service, request(200, 2));
        assert!(pending.poll().is_none());

        let (text, fallback) = pending.expire();
        assert!(fallback);
        assert_eq!(text, fallback_line("Neo", 200));
    }

    #[test]
    fn test_late_reply_is_picked_up() {
        let mut service = Stalled::default();
        let pending = PendingCommentary::dispatch(&mut service, request(200, 2));
        assert!(pending.poll().is_none());

        service.0[0].send(Ok("late but live".into())).unwrap();
        assert_eq!(pending.poll(), Some(("late but live".to_string(), false)));
    }

    #[test]
    fn test_dropped_request_falls_back() {
        let mut service = Stalled::default();
        let pending = PendingCommentary::dispatch(&mut service, request(200, 2));
        service.0.clear();
        assert_eq!(pending.poll().map(|(_, fallback)| fallback), Some(true));
    }
}
