use crate::Stats;
use std::net::SocketAddr;
use std::time::Instant;
use std::time::SystemTime;

/// Builder class to aid in the construction of Stats objects.
pub(crate) struct StatsBuilder {
    start: SystemTime,
    timer: Instant,
    request_size: usize,
}

impl StatsBuilder {
    /// Call just before the request is sent, with the payload size.
    pub fn start(request_size: usize) -> StatsBuilder {
        StatsBuilder {
            start: SystemTime::now(),
            timer: Instant::now(),

            request_size,
        }
    }

    /// Call just after the reply is received. Consumes the builder.
    pub fn end(self, server: SocketAddr, response_size: usize) -> Stats {
        Stats {
            start: self.start,
            duration: self.timer.elapsed(),

            request_size: self.request_size,

            server,
            response_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats() {
        let server: SocketAddr = "192.0.2.1:53".parse().unwrap();
        let stats = StatsBuilder::start(29).end(server, 45);

        assert_eq!(stats.server, server);
        assert_eq!(stats.request_size, 29);
        assert_eq!(stats.response_size, 45);
        assert!(stats.start <= SystemTime::now());
    }
}
