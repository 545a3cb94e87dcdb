use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// 生成一次性随机密码
pub fn generate_random_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_length_and_charset() {
        let pwd = generate_random_password(10);
        assert_eq!(pwd.chars().count(), 10);
        assert!(pwd.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn test_passwords_are_distinct() {
        let generated: HashSet<String> = (0..200).map(|_| generate_random_password(10)).collect();
        assert_eq!(generated.len(), 200);
    }
}
