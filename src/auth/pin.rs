//! PIN 校验和
//!
//! 沿用前端旧版的 32 位滚动校验公式。已保存在用户本地的
//! `offline_user` 记录依赖这个确切算法，不能更换。
//!
//! 已知弱点：这是校验和而不是密码学哈希，无盐、可碰撞、可逆推，
//! 只用于低价值的离线 PIN 门槛，属于刻意保留的旧行为。

/// 计算 PIN 的校验和，返回十进制字符串
///
/// 逐 UTF-16 码元迭代：`acc = (acc << 5) - acc + code`，
/// 按 32 位有符号二补码回绕。
pub fn hash_pin(pin: &str) -> String {
    let mut hash: i32 = 0;
    for code in pin.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(code as i32);
    }
    hash.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        // 旧版前端公式的固定向量
        assert_eq!(hash_pin("1234"), "1509442");
    }

    #[test]
    fn test_empty_pin() {
        assert_eq!(hash_pin(""), "0");
    }

    #[test]
    fn test_different_pins_usually_differ() {
        assert_ne!(hash_pin("1234"), hash_pin("9999"));
        assert_ne!(hash_pin("0000"), hash_pin("0001"));
    }

    #[test]
    fn test_long_pin_wraps_without_panic() {
        // 回绕到负数区间也必须是稳定的十进制输出
        let h = hash_pin("99999999999999999999");
        assert!(h.parse::<i32>().is_ok());
    }

    proptest! {
        #[test]
        fn prop_deterministic(pin in "[0-9]{0,12}") {
            prop_assert_eq!(hash_pin(&pin), hash_pin(&pin));
        }

        #[test]
        fn prop_output_is_i32_decimal(pin in "\\PC{0,24}") {
            prop_assert!(hash_pin(&pin).parse::<i32>().is_ok());
        }
    }
}
