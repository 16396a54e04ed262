//! サーバー設定

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// フレーム 1 つの書き込み期限
pub const DEFAULT_WRITE_WAIT: Duration = Duration::from_secs(5);
/// 読み込みが途絶えたとみなすまでの時間
pub const DEFAULT_PONG_WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },

    #[error("ping period ({ping_period:?}) must be shorter than pong wait ({pong_wait:?})")]
    PingNotShorterThanPong {
        ping_period: Duration,
        pong_wait: Duration,
    },
}

/// 全接続に適用する死活監視のタイミング
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    write_wait: Duration,
    pong_wait: Duration,
    ping_period: Duration,
}

impl HeartbeatConfig {
    /// タイミングを検証して作成する
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroDuration`] - いずれかの duration が 0
    /// * [`ConfigError::PingNotShorterThanPong`] - 読み込みタイムアウトより先に
    ///   Ping が届かない
    pub fn new(
        write_wait: Duration,
        pong_wait: Duration,
        ping_period: Duration,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("write wait", write_wait),
            ("pong wait", pong_wait),
            ("ping period", ping_period),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration { name });
            }
        }
        if ping_period >= pong_wait {
            return Err(ConfigError::PingNotShorterThanPong {
                ping_period,
                pong_wait,
            });
        }
        Ok(Self {
            write_wait,
            pong_wait,
            ping_period,
        })
    }

    /// ミリ秒の値から作成する。ping period を省略すると pong wait の 80 % になる
    pub fn from_millis(
        write_wait_ms: u64,
        pong_wait_ms: u64,
        ping_period_ms: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let ping_period_ms = ping_period_ms.unwrap_or_else(|| eighty_percent(pong_wait_ms));
        Self::new(
            Duration::from_millis(write_wait_ms),
            Duration::from_millis(pong_wait_ms),
            Duration::from_millis(ping_period_ms),
        )
    }

    pub fn write_wait(&self) -> Duration {
        self.write_wait
    }

    pub fn pong_wait(&self) -> Duration {
        self.pong_wait
    }

    pub fn ping_period(&self) -> Duration {
        self.ping_period
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            write_wait: DEFAULT_WRITE_WAIT,
            pong_wait: DEFAULT_PONG_WAIT,
            ping_period: DEFAULT_PONG_WAIT * 8 / 10,
        }
    }
}

/// 80 % を切り捨てで求める。u64 の全範囲で桁あふれしない
fn eighty_percent(value: u64) -> u64 {
    value / 10 * 8 + value % 10 * 8 / 10
}

/// ハブ以外にサーバーが必要とする設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// 専用ルートのないパスで配信するディレクトリ
    pub static_dir: PathBuf,
    pub heartbeat: HeartbeatConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("./web/static"),
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heartbeat() {
        // テスト項目: デフォルトは 5 秒 / 10 秒 / 8 秒
        // given (前提条件):
        // when (操作):
        let config = HeartbeatConfig::default();

        // then (期待する結果):
        assert_eq!(config.write_wait(), Duration::from_secs(5));
        assert_eq!(config.pong_wait(), Duration::from_secs(10));
        assert_eq!(config.ping_period(), Duration::from_secs(8));
    }

    #[test]
    fn test_from_millis_derives_ping_period() {
        // テスト項目: ping period を省略すると pong wait の 80 % になる
        // given (前提条件):
        // when (操作):
        let config = HeartbeatConfig::from_millis(1_000, 2_000, None).unwrap();

        // then (期待する結果):
        assert_eq!(config.ping_period(), Duration::from_millis(1_600));
        assert_eq!(config.write_wait(), Duration::from_secs(1));
    }

    #[test]
    fn test_ping_period_must_be_shorter_than_pong_wait() {
        // テスト項目: ping period が pong wait 以上なら拒否される
        // given (前提条件):
        // when (操作):
        let result = HeartbeatConfig::from_millis(1_000, 2_000, Some(2_000));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::PingNotShorterThanPong {
                ping_period: Duration::from_secs(2),
                pong_wait: Duration::from_secs(2),
            })
        );
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        // テスト項目: 長さ 0 の duration は拒否される
        // given (前提条件):
        // when (操作):
        let result = HeartbeatConfig::from_millis(0, 2_000, None);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::ZeroDuration { name: "write wait" })
        );
    }

    #[test]
    fn test_huge_pong_wait_derives_ping_period_without_overflow() {
        // テスト項目: 非常に大きな pong wait でも ping period の算出が桁あふれしない
        // given (前提条件):
        let pong_wait_ms = u64::MAX / 2;

        // when (操作):
        let config = HeartbeatConfig::from_millis(5_000, pong_wait_ms, None).unwrap();

        // then (期待する結果):
        assert_eq!(config.pong_wait(), Duration::from_millis(pong_wait_ms));
        assert_eq!(
            config.ping_period(),
            Duration::from_millis(eighty_percent(pong_wait_ms))
        );
        assert!(config.ping_period() < config.pong_wait());
    }

    #[test]
    fn test_eighty_percent_matches_exact_floor() {
        // テスト項目: 80 % の切り捨て計算は小さな値でも正確で、最大値でも桁あふれしない
        // given (前提条件):
        let small = [0u64, 1, 9, 14, 15, 2_000, 10_001];

        // when (操作) / then (期待する結果):
        for value in small {
            assert_eq!(eighty_percent(value), value * 8 / 10);
        }
        assert_eq!(
            u128::from(eighty_percent(u64::MAX)),
            u128::from(u64::MAX) * 8 / 10
        );
    }
}
