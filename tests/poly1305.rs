use cryptal_poly1305::mac::poly1305::{Poly1305, auth, verify};

fn hex16(s: &str) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).unwrap();
    }
    out
}

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn tag_of(r: &[u8; 16], s: &[u8; 16], msg: &[u8]) -> [u8; 16] {
    let mut mac = Poly1305::init(r, s).unwrap();
    mac.update(msg).unwrap();
    mac.digest().unwrap()
}

fn expect_tag(r: &str, s: &str, msg: &[u8], expected: &str) {
    let got = tag_of(&hex16(r), &hex16(s), msg);

    assert_eq!(
        got,
        hex16(expected),
        "Tag mismatch for message of {} bytes\nExpected {}\nGot      {:02x?}",
        msg.len(),
        expected,
        got,
    );
}

const IETF: &[u8] = b"Any submission to the IETF intended by the Contributor for publication \
as all or part of an IETF Internet-Draft or RFC and any statement made within the context of \
an IETF activity is considered an \"IETF Contribution\". Such statements include oral \
statements in IETF sessions, as well as written and electronic communications made at any \
time or place, which are addressed to";

const RFC_R: &str = "85d6be7857556d337f4452fe42d506a8";
const RFC_S: &str = "0103808afb0db2fd4abff6af4149f51b";

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

// -------------------------------------------------------
// RFC 8439 VECTORS
// -------------------------------------------------------

#[test]
fn poly1305_rfc8439_section_2_5_2() {
    expect_tag(
        RFC_R,
        RFC_S,
        b"Cryptographic Forum Research Group",
        "a8061dc1305136c6c22b8baf0c0127a9",
    );
}

#[test]
fn poly1305_rfc8439_one_shot_combined_key() {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&hex16(RFC_R));
    key[16..].copy_from_slice(&hex16(RFC_S));

    let tag = auth(&key, b"Cryptographic Forum Research Group");
    assert_eq!(tag, hex16("a8061dc1305136c6c22b8baf0c0127a9"));
    assert!(verify(&key, b"Cryptographic Forum Research Group", &tag));
}

#[test]
fn poly1305_vector_all_zero_key() {
    expect_tag(
        "00000000000000000000000000000000",
        "00000000000000000000000000000000",
        &[0u8; 64],
        "00000000000000000000000000000000",
    );
}

#[test]
fn poly1305_vector_zero_r_yields_s() {
    assert_eq!(IETF.len(), 375);

    expect_tag(
        "00000000000000000000000000000000",
        "36e5f6b5c5e06070f0efca96227a863e",
        IETF,
        "36e5f6b5c5e06070f0efca96227a863e",
    );
}

#[test]
fn poly1305_vector_ietf_text_zero_s() {
    expect_tag(
        "36e5f6b5c5e06070f0efca96227a863e",
        "00000000000000000000000000000000",
        IETF,
        "f3477e7cd95417af89a6b8794c310cf0",
    );
}

// -------------------------------------------------------
// REDUCTION EDGE CASES (RFC 8439 APPENDIX A.3)
// -------------------------------------------------------

#[test]
fn poly1305_h_equal_to_p_reduces_to_zero_plus_three() {
    // (2^128 - 1 + 2^128) * 2 = 2^130 - 2 = p + 3
    expect_tag(
        "02000000000000000000000000000000",
        "00000000000000000000000000000000",
        &[0xff; 16],
        "03000000000000000000000000000000",
    );
}

#[test]
fn poly1305_s_addition_wraps_modulo_2_128() {
    let mut msg = [0u8; 16];
    msg[0] = 0x02;

    expect_tag(
        "02000000000000000000000000000000",
        "ffffffffffffffffffffffffffffffff",
        &msg,
        "03000000000000000000000000000000",
    );
}

#[test]
fn poly1305_h_just_below_p_is_kept() {
    let mut msg = [0xffu8; 16];
    msg[0] = 0xfd;

    expect_tag(
        "02000000000000000000000000000000",
        "00000000000000000000000000000000",
        &msg,
        "faffffffffffffffffffffffffffffff",
    );
}

#[test]
fn poly1305_accumulator_crosses_2_130() {
    let mut msg = vec![0xffu8; 16];
    msg.push(0xf0);
    msg.extend_from_slice(&[0xff; 15]);
    msg.push(0x11);
    msg.extend_from_slice(&[0x00; 15]);

    expect_tag(
        "01000000000000000000000000000000",
        "00000000000000000000000000000000",
        &msg,
        "05000000000000000000000000000000",
    );
}

#[test]
fn poly1305_accumulator_lands_exactly_on_p() {
    let mut msg = vec![0xffu8; 16];
    msg.push(0xfb);
    msg.extend_from_slice(&[0xfe; 15]);
    msg.extend_from_slice(&[0x01; 16]);

    expect_tag(
        "01000000000000000000000000000000",
        "00000000000000000000000000000000",
        &msg,
        "00000000000000000000000000000000",
    );
}

#[test]
fn poly1305_high_r_word_folding() {
    let msg = hex(
        "e33594d7505e43b900000000000000003394d7505e4379cd0100000000000000\
         0000000000000000000000000000000001000000000000000000000000000000",
    );

    expect_tag(
        "01000000000000000400000000000000",
        "00000000000000000000000000000000",
        &msg,
        "14000000000000005500000000000000",
    );

    expect_tag(
        "01000000000000000400000000000000",
        "00000000000000000000000000000000",
        &msg[..48],
        "13000000000000000000000000000000",
    );
}

// -------------------------------------------------------
// MESSAGE LENGTH BOUNDARIES
// -------------------------------------------------------

#[test]
fn poly1305_empty_message_is_s() {
    expect_tag(RFC_R, RFC_S, &[], RFC_S);
}

#[test]
fn poly1305_block_boundaries() {
    let cases = [
        (1, "9a0b936300624f75c208322d1009df3a"),
        (15, "96d35c0a53d682bc2834aab169aba194"),
        (16, "4d14ddbc50e0958b0b850cfbe3c7db39"),
        (17, "80c0ba08f77840ba12375897b104b289"),
        (31, "cbadbb6f33d0cb5ce00d9dde72580e46"),
        (32, "d54b0417dba4befd365cd42f8c31ac1f"),
        (33, "32ef25861b777e1dcf8885688e15f674"),
        (64, "fbd9b92b60883360442fb49d7ab8e87e"),
        (100, "17b26e6af9f51836ab0450b4e7b9b8c6"),
    ];

    for (len, expected) in cases {
        expect_tag(RFC_R, RFC_S, &pattern(len), expected);
    }
}

#[test]
fn poly1305_padding_distinguishes_trailing_zero() {
    let r = hex16(RFC_R);
    let s = hex16(RFC_S);

    let a = tag_of(&r, &s, &[0x41]);
    let b = tag_of(&r, &s, &[0x41, 0x00]);

    assert_ne!(a, b);
}

#[test]
fn poly1305_verify_rejects_modified_message() {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&hex16(RFC_R));
    key[16..].copy_from_slice(&hex16(RFC_S));

    let tag = auth(&key, b"Cryptographic Forum Research Group");
    assert!(!verify(&key, b"Cryptographic Forum Research Grouq", &tag));

    let mut bad = tag;
    bad[15] ^= 0x80;
    assert!(!verify(&key, b"Cryptographic Forum Research Group", &bad));
}
