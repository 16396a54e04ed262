//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if reconnecting cannot help (e.g., CapacityRejected),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::CapacityRejected(_) | ClientError::ReconnectExhausted(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - Number of failed sessions so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_on_capacity_rejection() {
        // テスト項目: 定員超過で拒否された場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::CapacityRejected("participant limit reached".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_not_exit_immediately_on_connection_error() {
        // テスト項目: 接続エラーの場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("Connection lost".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 接続エラーで試行回数が上限未満なら再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("Connection lost".to_string());

        // when (操作):
        let first = should_attempt_reconnect(&error, 1, 5);
        let last = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(first);
        assert!(last);
    }

    #[test]
    fn test_should_not_attempt_reconnect_at_limit() {
        // テスト項目: 試行回数が上限に達したら再接続しない
        // given (前提条件):
        let error = ClientError::ConnectionError("Connection lost".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_not_attempt_reconnect_after_rejection() {
        // テスト項目: 定員超過で拒否された場合、試行回数に関係なく再接続しない
        // given (前提条件):
        let error = ClientError::CapacityRejected("participant limit reached".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
