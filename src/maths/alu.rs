//! Addition and subtraction with condition flags
//!
//! Both operations are generic over the unsigned machine word they operate
//! on. The core itself only ever uses `u64`, but the flag rules do not depend
//! on the width and are easier to check exhaustively on `u8`.

use crate::maths::Flags;
use num_traits::{PrimInt, Unsigned, WrappingAdd};

/// The sign bit of a value, when read as two's complement.
pub fn sign<T>(value: T) -> bool
where
    T: PrimInt + Unsigned,
{
    value.leading_zeros() == 0
}

/// Compute `a + b`, wrapping, along with the flags the sum produces.
///
/// The carry flag reports unsigned overflow. The overflow flag is set when
/// both operands have the same sign and the result's sign differs from it.
pub fn add<T>(a: T, b: T) -> (T, Flags)
where
    T: PrimInt + Unsigned + WrappingAdd,
{
    let result = a.wrapping_add(&b);
    let (a_sign, b_sign, result_sign) = (sign(a), sign(b), sign(result));

    let flags = Flags {
        cf: result < a,
        zf: result == T::zero(),
        sf: result_sign,
        of: a_sign == b_sign && result_sign != a_sign,
    };

    (result, flags)
}

/// Compute `dst - src` as `dst + (!src + 1)`, along with the flags the
/// difference produces.
///
/// The carry flag reports a borrow, i.e. `src` was larger than `dst` when both
/// are read as unsigned. The overflow flag is set when the operands' signs
/// differ and the result's sign differs from `dst`'s.
pub fn sub<T>(dst: T, src: T) -> (T, Flags)
where
    T: PrimInt + Unsigned + WrappingAdd,
{
    let negated = (!src).wrapping_add(&T::one());
    let result = dst.wrapping_add(&negated);
    let (dst_sign, src_sign, result_sign) = (sign(dst), sign(src), sign(result));

    let flags = Flags {
        cf: result > dst,
        zf: result == T::zero(),
        sf: result_sign,
        of: src_sign != dst_sign && result_sign != dst_sign,
    };

    (result, flags)
}
