// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use hive_bundle::{Address, Bundle, Fragment, Transaction, TransactionBuilder};
use hive_ternary::{ErrorPolicy, TryteString};

const DEEP_THOUGHT: &str = r#"
"Good morning," said Deep Thought at last.
"Er... Good morning, O Deep Thought," said Loonquawl nervously.
  "Do you have... er, that is..."
"... an answer for you?" interrupted Deep Thought majestically. "Yes. I have."
The two men shivered with expectancy. Their waiting had not been in vain.
"There really is one?" breathed Phouchg.
"There really is one," confirmed Deep Thought.
"To Everything? To the great Question of Life, the Universe and Everything?"
"Yes."
Both of the men had been trained for this moment; their lives had been a
  preparation for it; they had been selected at birth as those who would
  witness the answer; but even so they found themselves gasping and squirming
  like excited children.
"And you're ready to give it to us?" urged Loonquawl.
"I am."
"Now?"
"Now," said Deep Thought.
They both licked their dry lips.
"Though I don't think," added Deep Thought, "that you're going to like it."
"Doesn't matter," said Phouchg. "We must know it! Now!"
"Now?" enquired Deep Thought.
"Yes! Now!"
"All right," said the computer and settled into silence again.
  The two men fidgeted. The tension was unbearable.
"You're really not going to like it," observed Deep Thought.
"Tell us!"
"All right," said Deep Thought. "The Answer to the Great Question..."
"Yes?"
"Of Life, the Universe and Everything..." said Deep Thought.
"Yes??"
"Is..."
"Yes?!"
"Forty-two," said Deep Thought, with infinite majesty and calm.
        "#;

fn transaction(address: &str, value: i64, fragment: Fragment, current_index: usize) -> Transaction {
    TransactionBuilder::new()
        .with_address(Address::try_from_str(address).unwrap())
        .with_value(value)
        .with_signature_message_fragment(fragment)
        .with_current_index(current_index)
        .with_last_index(7)
        .with_timestamp(1_485_020_456)
        .build()
        .unwrap()
}

fn message_fragments(message: &str) -> Vec<Fragment> {
    let trytes = TryteString::from_utf8_str(message);
    trytes
        .as_trytes()
        .chunks(Fragment::LENGTH)
        .map(|chunk| Fragment::try_from_inner(TryteString::from(chunk)).unwrap())
        .collect()
}

/// Eight transactions: an empty head, an undecodable fragment, two plain
/// messages (one spanning two fragments), a signed input pair and a change
/// transaction with a message of its own.
fn message_bundle() -> Bundle {
    let deep_thought = message_fragments(DEEP_THOUGHT);
    assert_eq!(deep_thought.len(), 2);
    let signature = message_fragments("This is a signature, not a message!").remove(0);

    Bundle::from(vec![
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999A9PG9AXCQANAWGJBTFWEAEQCN9WBZB9BJAIIY9UDLIGFOAA",
            0,
            Fragment::zeros(),
            0,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999HAA9UAMHCGKEUGYFUBIARAXBFASGLCHCBEVGTBDCSAEBTBM",
            10,
            Fragment::try_from_str("OHCFVELH9GYEMHCF9GPHBGIEWHZFU").unwrap(),
            1,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999D99HEAM9XADCPFJDFANCIHR9OBDHTAGGE9TGCI9EO9ZCRBN",
            20,
            message_fragments("Hello, world!").remove(0),
            2,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999A9PG9AXCQANAWGJBTFWEAEQCN9WBZB9BJAIIY9UDLIGFOAA",
            30,
            deep_thought[0].clone(),
            3,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999A9PG9AXCQANAWGJBTFWEAEQCN9WBZB9BJAIIY9UDLIGFOAA",
            0,
            deep_thought[1].clone(),
            4,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999WGSBUAHDVHYHOBHGP9VCGIZHNCAAQFJGE9YHEHEFTDAGXHY",
            -100,
            signature.clone(),
            5,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999WGSBUAHDVHYHOBHGP9VCGIZHNCAAQFJGE9YHEHEFTDAGXHY",
            0,
            signature,
            6,
        ),
        transaction(
            "TESTVALUE9DONTUSEINPRODUCTION99999FFYALHN9ACYCP99GZBSDK9CECFI9RAIH9BRCCAHAIAWEFAN",
            40,
            message_fragments("I can haz change?").remove(0),
            7,
        ),
    ])
}

#[test]
fn messages_drop() {
    let messages = message_bundle().messages(ErrorPolicy::Drop).unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], "Hello, world!");
    assert_eq!(messages[1], DEEP_THOUGHT);
    assert_eq!(messages[2], "I can haz change?");
}

#[test]
fn messages_strict() {
    assert!(message_bundle().messages(ErrorPolicy::Strict).is_err());
}

#[test]
fn messages_ignore() {
    let messages = message_bundle().messages(ErrorPolicy::Ignore).unwrap();

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], "\u{795d}\u{4f60}\u{597d}\u{8fd0}\u{15}");
}

#[test]
fn messages_replace() {
    let messages = message_bundle().messages(ErrorPolicy::Replace).unwrap();

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], "\u{795d}\u{4f60}\u{597d}\u{8fd0}\u{fffd}\u{15}");
}
