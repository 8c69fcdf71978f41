//! Prime helpers used to size the slot array

/// Returns true if `n` is prime, using trial division up to `√n`
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut divisor: usize = 3;
    // `divisor <= n / divisor` is `divisor * divisor <= n` without overflow
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`, or `None` if it does not fit in a
/// `usize`
#[must_use]
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_values() {
        let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    }

    #[test]
    fn test_is_prime_squares_and_large() {
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(1_000_001));
        assert!(is_prime(1_000_003));
        assert!(is_prime(104_729));
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(2), Some(2));
        assert_eq!(next_prime(4), Some(5));
        assert_eq!(next_prime(62), Some(67));
        assert_eq!(next_prime(100_000), Some(100_003));
    }

    #[test]
    fn test_next_prime_overflow() {
        // usize::MAX is odd and composite on 64-bit targets; nothing larger fits
        assert_eq!(next_prime(usize::MAX), None);
    }
}
