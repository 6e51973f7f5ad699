use super::*;
use crate::float::{Float16, Float32, Float64};
use crate::num::{IBig, Int8, Int64, Int128, UBig, UInt8, UInt32, UInt64, UInt128};
use crate::seq::{map_of, record};
use crate::simple::{Bool, Null, Simple, Undefined};
use crate::string::{Bytes, Text};
use crate::tag::Bignum;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use hex_literal::hex;
use num_bigint::{BigInt, BigUint};

#[test]
fn rfc_unsigned() {
    // RFC 8949, Appendix A:
    // https://www.rfc-editor.org/rfc/rfc8949.html#section-appendix.a
    assert_eq!(decode(&UInt64, &hex!("00")).unwrap(), 0);
    assert_eq!(decode(&UInt64, &hex!("01")).unwrap(), 1);
    assert_eq!(decode(&UInt64, &hex!("0a")).unwrap(), 10);
    assert_eq!(decode(&UInt64, &hex!("17")).unwrap(), 23);
    assert_eq!(decode(&UInt64, &hex!("1818")).unwrap(), 24);
    assert_eq!(decode(&UInt64, &hex!("1819")).unwrap(), 25);
    assert_eq!(decode(&UInt64, &hex!("1864")).unwrap(), 100);
    assert_eq!(decode(&UInt64, &hex!("1903e8")).unwrap(), 1000);
    assert_eq!(decode(&UInt64, &hex!("1a000f4240")).unwrap(), 1000000);
    assert_eq!(
        decode(&UInt64, &hex!("1b000000e8d4a51000")).unwrap(),
        1000000000000
    );
    assert_eq!(
        decode(&UInt64, &hex!("1bffffffffffffffff")).unwrap(),
        18446744073709551615
    );
}

#[test]
fn rfc_negative() {
    assert_eq!(decode(&Int64, &hex!("20")).unwrap(), -1);
    assert_eq!(decode(&Int64, &hex!("29")).unwrap(), -10);
    assert_eq!(decode(&Int64, &hex!("37")).unwrap(), -24);
    assert_eq!(decode(&Int64, &hex!("3818")).unwrap(), -25);
    assert_eq!(decode(&Int64, &hex!("3863")).unwrap(), -100);
    assert_eq!(decode(&Int64, &hex!("3903e7")).unwrap(), -1000);
}

#[test]
fn narrow_targets_accept_any_wire_width() {
    assert_eq!(decode(&UInt8, &hex!("00")).unwrap(), 0);
    assert_eq!(decode(&UInt8, &hex!("18ff")).unwrap(), 255);
    assert_eq!(decode(&UInt8, &hex!("1900ff")).unwrap(), 255);
    assert_eq!(decode(&UInt32, &hex!("1a000f4240")).unwrap(), 1000000);
    assert_eq!(decode(&Int8, &hex!("3863")).unwrap(), -100);
    assert!(matches!(
        decode(&UInt8, &hex!("190100")),
        Err(Error::Overflow)
    ));
    assert!(matches!(
        decode(&Int8, &hex!("38ff")),
        Err(Error::Underflow)
    ));
}

#[test]
fn integer_promotion_does_not_wrap() {
    // -(2^64) fits no machine i64; the wide codec must produce it exactly.
    assert!(matches!(
        decode(&Int64, &hex!("3bffffffffffffffff")),
        Err(Error::Underflow)
    ));
    assert_eq!(
        decode(&Int128, &hex!("3bffffffffffffffff")).unwrap(),
        -(1i128 << 64)
    );
    assert!(matches!(
        decode(&Int64, &hex!("1bffffffffffffffff")),
        Err(Error::Overflow)
    ));
    assert_eq!(
        decode(&Int128, &hex!("1bffffffffffffffff")).unwrap(),
        u64::MAX as i128
    );
}

#[test]
fn arbitrary_width_integers() {
    assert_eq!(
        decode(&UBig, &hex!("1bffffffffffffffff")).unwrap(),
        BigUint::from(u64::MAX)
    );
    assert_eq!(
        decode(&UBig, &hex!("1cffffffffffffffffffffffffffffffff")).unwrap(),
        BigUint::from(u128::MAX)
    );
    assert_eq!(
        decode(&IBig, &hex!("3bffffffffffffffff")).unwrap(),
        BigInt::from(-(1i128 << 64))
    );
    assert_eq!(
        decode(&IBig, &hex!("3cffffffffffffffffffffffffffffffff")).unwrap(),
        BigInt::from(-1) - BigInt::from(u128::MAX)
    );
    assert!(matches!(
        decode(&IBig, &hex!("f4")),
        Err(Error::IncorrectType {
            expected: "integer",
            ..
        })
    ));
}

#[test]
fn sixteen_byte_extension() {
    assert_eq!(
        decode(&UInt128, &hex!("1c00000000000000010000000000000000")).unwrap(),
        1u128 << 64
    );
    assert_eq!(
        decode(&UInt128, &hex!("1cffffffffffffffffffffffffffffffff")).unwrap(),
        u128::MAX
    );
    // Narrower targets range-check the wide argument instead of truncating.
    assert!(matches!(
        decode(&UInt64, &hex!("1c00000000000000010000000000000000")),
        Err(Error::Overflow)
    ));
    assert_eq!(
        decode(&Int128, &hex!("3c00000000000000010000000000000000")).unwrap(),
        -1 - (1i128 << 64)
    );
}

#[test]
fn reserved_additional_info() {
    assert!(matches!(
        decode(&UInt64, &hex!("1d")),
        Err(Error::ReservedAdditional(29))
    ));
    assert!(matches!(
        decode(&UInt64, &hex!("1e")),
        Err(Error::ReservedAdditional(30))
    ));
    // The 16-byte extension does not apply to major type 7.
    assert!(matches!(
        decode(&Float64, &hex!("fc")),
        Err(Error::ReservedAdditional(28))
    ));
}

#[test]
fn rfc_floats() {
    assert_eq!(decode(&Float16, &hex!("f90000")).unwrap(), 0.0);
    let negative_zero = decode(&Float16, &hex!("f98000")).unwrap();
    assert_eq!(negative_zero, 0.0);
    assert!(negative_zero.is_sign_negative());
    assert_eq!(decode(&Float16, &hex!("f93c00")).unwrap(), 1.0);
    assert_eq!(decode(&Float16, &hex!("f93e00")).unwrap(), 1.5);
    assert_eq!(decode(&Float16, &hex!("f97bff")).unwrap(), 65504.0);
    assert_eq!(
        decode(&Float16, &hex!("f90001")).unwrap(),
        5.9604644775390625e-8
    );
    assert_eq!(decode(&Float16, &hex!("f90400")).unwrap(), 0.00006103515625);
    assert_eq!(decode(&Float16, &hex!("f9c400")).unwrap(), -4.0);
    assert_eq!(decode(&Float16, &hex!("f97c00")).unwrap(), f32::INFINITY);
    assert!(decode(&Float16, &hex!("f97e00")).unwrap().is_nan());
    assert_eq!(decode(&Float16, &hex!("f9fc00")).unwrap(), f32::NEG_INFINITY);

    assert_eq!(decode(&Float32, &hex!("fa47c35000")).unwrap(), 100000.0);
    assert_eq!(decode(&Float32, &hex!("fa7f7fffff")).unwrap(), f32::MAX);
    assert_eq!(decode(&Float32, &hex!("fa7f800000")).unwrap(), f32::INFINITY);
    assert!(decode(&Float32, &hex!("fa7fc00000")).unwrap().is_nan());

    assert_eq!(decode(&Float64, &hex!("fb3ff199999999999a")).unwrap(), 1.1);
    assert_eq!(
        decode(&Float64, &hex!("fb7e37e43c8800759c")).unwrap(),
        1.0e300
    );
    assert_eq!(
        decode(&Float64, &hex!("fbc010666666666666")).unwrap(),
        -4.1
    );
    assert_eq!(
        decode(&Float64, &hex!("fb7ff0000000000000")).unwrap(),
        f64::INFINITY
    );
    assert!(decode(&Float64, &hex!("fb7ff8000000000000")).unwrap().is_nan());
    assert_eq!(
        decode(&Float64, &hex!("fbfff0000000000000")).unwrap(),
        f64::NEG_INFINITY
    );
}

#[test]
fn floats_wire_at_declared_width_only() {
    assert!(matches!(
        decode(&Float32, &hex!("f93c00")),
        Err(Error::IncorrectType {
            expected: "single-precision float",
            found: "half-precision float",
            offset: 0,
        })
    ));
    assert!(matches!(
        decode(&Float16, &hex!("fb3ff199999999999a")),
        Err(Error::IncorrectType { .. })
    ));
    assert!(matches!(
        decode(&Float64, &hex!("01")),
        Err(Error::IncorrectType { .. })
    ));
}

#[test]
fn rfc_simple() {
    assert!(!decode(&Bool, &hex!("f4")).unwrap());
    assert!(decode(&Bool, &hex!("f5")).unwrap());
    decode(&Null, &hex!("f6")).unwrap();
    decode(&Undefined, &hex!("f7")).unwrap();
    assert_eq!(decode(&Simple, &hex!("f0")).unwrap(), 16);
    assert_eq!(decode(&Simple, &hex!("f8ff")).unwrap(), 255);
    assert_eq!(decode(&Simple, &hex!("f820")).unwrap(), 32);

    // 20..=23 surface as their own decoded types.
    assert!(matches!(
        decode(&Simple, &hex!("f4")),
        Err(Error::IncorrectType {
            expected: "simple value",
            found: "bool",
            ..
        })
    ));
    // The two-byte form is not well-formed below 32.
    assert!(matches!(
        decode(&Simple, &hex!("f800")),
        Err(Error::InvalidSimple(0))
    ));
}

#[test]
fn rfc_strings() {
    assert_eq!(decode(&Bytes, &hex!("40")).unwrap(), Vec::<u8>::new());
    assert_eq!(decode(&Bytes, &hex!("4401020304")).unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(decode(&Text, &hex!("60")).unwrap(), "");
    assert_eq!(decode(&Text, &hex!("6161")).unwrap(), "a");
    assert_eq!(decode(&Text, &hex!("6449455446")).unwrap(), "IETF");
    assert_eq!(decode(&Text, &hex!("62225c")).unwrap(), "\"\\");
    assert_eq!(decode(&Text, &hex!("62c3bc")).unwrap(), "\u{fc}");
    assert_eq!(decode(&Text, &hex!("63e6b0b4")).unwrap(), "\u{6c34}");
}

#[test]
fn indefinite_strings_match_definite() {
    // 5f 42 0102 41 03 ff decodes the same bytes as 43 010203.
    assert_eq!(
        decode(&Bytes, &hex!("5f42010241 03ff")).unwrap(),
        decode(&Bytes, &hex!("43010203")).unwrap()
    );
    assert_eq!(
        decode(&Text, &hex!("7f657374726561646d696e67ff")).unwrap(),
        "streaming"
    );
    assert_eq!(decode(&Bytes, &hex!("5fff")).unwrap(), Vec::<u8>::new());
}

#[test]
fn invalid_string_bodies() {
    assert!(matches!(
        decode(&Text, &hex!("61ff")),
        Err(Error::InvalidUtf8)
    ));
    // A chunk must be a definite string of the same kind.
    assert!(matches!(
        decode(&Bytes, &hex!("5f00")),
        Err(Error::InvalidChunk)
    ));
    assert!(matches!(
        decode(&Bytes, &hex!("5f6161ff")),
        Err(Error::InvalidChunk)
    ));
    assert!(matches!(
        decode(&Bytes, &hex!("5f5f")),
        Err(Error::InvalidChunk)
    ));
    assert!(matches!(
        decode(&Text, &hex!("62c3")),
        Err(Error::NotEnoughData)
    ));
    assert!(matches!(
        decode(&Bytes, &hex!("5f420102")),
        Err(Error::NotEnoughData)
    ));
}

#[test]
fn rfc_arrays() {
    assert_eq!(
        decode(&UInt64.array(), &hex!("80")).unwrap(),
        Vec::<u64>::new()
    );
    assert_eq!(
        decode(&UInt8.array(), &hex!("83010203")).unwrap(),
        vec![1, 2, 3]
    );
    assert_eq!(
        decode(
            &UInt32.array(),
            &hex!("98190102030405060708090a0b0c0d0e0f101112131415161718181819")
        )
        .unwrap(),
        (1..=25).collect::<Vec<u32>>()
    );
    assert_eq!(
        decode(&UInt8.array(), &hex!("9fff")).unwrap(),
        Vec::<u8>::new()
    );
    assert_eq!(
        decode(&UInt8.array(), &hex!("9f0102ff")).unwrap(),
        vec![1, 2]
    );
}

#[test]
fn records_decode_heterogeneous_arrays() {
    let schema = record((UInt8, UInt8.array(), UInt8.array()));
    let expected = (1, vec![2, 3], vec![4, 5]);
    assert_eq!(decode(&schema, &hex!("8301820203820405")).unwrap(), expected);
    // Either length regime is accepted, in any nesting mix.
    assert_eq!(
        decode(&schema, &hex!("9f018202039f0405ffff")).unwrap(),
        expected
    );
    assert_eq!(
        decode(&schema, &hex!("83018202039f0405ff")).unwrap(),
        expected
    );

    assert!(matches!(
        decode(&schema, &hex!("8201820203")),
        Err(Error::IncorrectLength {
            expected: 3,
            found: 2
        })
    ));
    assert!(matches!(
        decode(&schema, &hex!("9f01820203820405 00ff")),
        Err(Error::AdditionalItems)
    ));
}

#[test]
fn under_length_containers_never_truncate() {
    assert!(matches!(
        decode(&UInt8.array(), &hex!("830102")),
        Err(Error::NotEnoughData)
    ));
    assert!(matches!(
        decode(&map_of(UInt8, UInt8), &hex!("a20102")),
        Err(Error::NotEnoughData)
    ));
    assert!(matches!(
        decode(&UInt64, &hex!("1901")),
        Err(Error::NotEnoughData)
    ));
}

#[test]
fn rfc_maps() {
    assert!(decode(&map_of(UInt8, UInt8), &hex!("a0")).unwrap().is_empty());

    let m = decode(&map_of(UInt8, UInt8), &hex!("a201020304")).unwrap();
    assert_eq!(m.get(&1), Some(&2));
    assert_eq!(m.get(&3), Some(&4));
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![1, 3]);

    let m = decode(
        &map_of(Text, Text),
        &hex!("a56161614161626142616361436164614461656145"),
    )
    .unwrap();
    assert_eq!(m.len(), 5);
    assert_eq!(m.get("a").map(|v| v.as_str()), Some("A"));
    assert_eq!(m.get("e").map(|v| v.as_str()), Some("E"));

    let m = decode(&map_of(Text, UInt8), &hex!("bf616101616202ff")).unwrap();
    assert_eq!(m.get("a"), Some(&1));
    assert_eq!(m.get("b"), Some(&2));
}

#[test]
fn duplicate_map_keys_overwrite() {
    let m = decode(&map_of(Text, UInt8), &hex!("a3616101616202616103")).unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("a"), Some(&3));
    assert_eq!(m.get("b"), Some(&2));
    assert_eq!(
        m.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}

#[test]
fn rfc_tags() {
    assert_eq!(
        decode(
            &Text.tagged(0),
            &hex!("c074323031332d30332d32315432303a30343a30305a")
        )
        .unwrap(),
        "2013-03-21T20:04:00Z"
    );
    assert_eq!(
        decode(&UInt64.tagged(1), &hex!("c11a514b67b0")).unwrap(),
        1363896240
    );
    assert_eq!(
        decode(&Bytes.with_any_tag(), &hex!("d74401020304")).unwrap(),
        (23, vec![1, 2, 3, 4])
    );

    assert!(matches!(
        decode(&UInt64.tagged(0), &hex!("c11a514b67b0")),
        Err(Error::IncorrectTag {
            expected: 0,
            found: 1
        })
    ));
    assert!(matches!(
        decode(&UInt64.tagged(0), &hex!("df")),
        Err(Error::InvalidIndefinite("tag"))
    ));
}

#[test]
fn rfc_bignums() {
    assert_eq!(
        decode(&Bignum, &hex!("c249010000000000000000")).unwrap(),
        BigInt::from(1u128 << 64)
    );
    assert_eq!(
        decode(&Bignum, &hex!("c349010000000000000000")).unwrap(),
        BigInt::from(-1 - (1i128 << 64))
    );
    // Empty byte string is zero.
    assert_eq!(decode(&Bignum, &hex!("c240")).unwrap(), BigInt::from(0));
    assert_eq!(decode(&Bignum, &hex!("c340")).unwrap(), BigInt::from(-1));
    // A chunked magnitude is still well-formed.
    assert_eq!(
        decode(&Bignum, &hex!("c25f42010241 03ff")).unwrap(),
        BigInt::from(0x010203)
    );
    assert!(matches!(
        decode(&Bignum, &hex!("c4")),
        Err(Error::IncorrectBignumTag(4))
    ));
}

#[test]
fn type_mismatch_names_both_sides() {
    assert_eq!(
        decode(&UInt64, &hex!("20")),
        Err(Error::IncorrectType {
            expected: "unsigned integer",
            found: "negative integer",
            offset: 0,
        })
    );
    assert!(matches!(
        decode(&Text, &hex!("4401020304")),
        Err(Error::IncorrectType {
            expected: "text string",
            found: "byte string",
            ..
        })
    ));
    assert!(matches!(
        decode(&UInt64, &hex!("ff")),
        Err(Error::IncorrectType { found: "break", .. })
    ));
}

#[test]
fn decode_prefix_reports_consumption() {
    assert_eq!(decode_prefix(&UInt8, &hex!("0102")).unwrap(), (1, 1));
    let data = hex!("6161");
    let mut d = Decoder::new(&data[..]);
    assert_eq!(Text.decode(&mut d).unwrap(), "a");
    assert!(d.is_exhausted().unwrap());
}

struct Trickle<'a>(&'a [u8]);

impl braid_io::ErrorType for Trickle<'_> {
    type Error = core::convert::Infallible;
}

impl braid_io::Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        if self.0.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.0[0];
        self.0 = &self.0[1..];
        Ok(1)
    }
}

#[test]
fn refill_spans_source_chunks() {
    // One byte per read; multi-byte pulls must refill transparently.
    let data = hex!("8261611a000f4240");
    let mut d = Decoder::new(Trickle(&data));
    let schema = record((Text, UInt64));
    assert_eq!(
        schema.decode(&mut d).unwrap(),
        ("a".to_string(), 1000000)
    );
    assert!(d.is_exhausted().unwrap());
}

#[test]
fn byte_budget_surfaces_as_end_of_input() {
    let data = hex!("1a000f4240");
    let mut d = Decoder::new(braid_io::Limited::new(&data[..], 2));
    assert!(matches!(UInt64.decode(&mut d), Err(Error::NotEnoughData)));
}
