// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

use ark_bls12_381::Fr;
use ark_ff::PrimeField;
use gadgetlib::prelude::*;
use num_traits::{One, Zero};

#[test]
fn nand_scenario() {
    let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
    let inputs = pb.allocate_array(5, "inputs");
    let output = pb.allocate("output");
    let nand = NandGadget::create(&mut pb, &inputs, output);
    nand.generate_constraints(&mut pb);

    for input in &inputs {
        pb.set_val(*input, Fr::one());
    }
    nand.generate_witness(&mut pb).unwrap();
    assert!(pb.is_satisfied());
    assert_eq!(pb.val(output), Fr::zero());

    pb.set_val(inputs[2], Fr::zero());
    assert!(!pb.is_satisfied());
    pb.set_val(inputs[1], Fr::from(2u64));
    assert!(!pb.is_satisfied());
    pb.set_val(inputs[1], Fr::one());

    nand.generate_witness(&mut pb).unwrap();
    assert_eq!(pb.val(output), Fr::one());
    assert!(pb.is_satisfied());
}

#[test]
fn hash_difficulty_scenario() {
    let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
    let hash_value = MultiPackedWord::new(&mut pb, 64, "hashValue");
    let difficulty =
        HashDifficultyGadget::create(&mut pb, hash_value.clone(), 10);
    difficulty.generate_constraints(&mut pb);

    pb.set_val(hash_value[0], Fr::from(42u64));
    difficulty.generate_witness(&mut pb).unwrap();
    assert!(pb.is_satisfied_with(PrintOptions::DbgPrintIfNotSatisfied));

    pb.set_val(hash_value[0], Fr::from(1_000_000_000_000_000_000u64));
    difficulty.generate_witness(&mut pb).unwrap();
    assert!(!pb.is_satisfied());
}

#[test]
fn transaction_amounts_scenario() {
    let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
    let inputs = pb.allocate_array(2, "inputs");
    let outputs = pb.allocate_array(3, "outputs");
    let fee = pb.allocate("fee");
    let tx = TransactionAmountsGadget::create(&mut pb, &inputs, &outputs, fee);

    for input in &inputs {
        pb.set_val(*input, Fr::from(2u64));
    }
    for output in &outputs {
        pb.set_val(*output, Fr::one());
    }
    gadget::generate_all(&mut pb, &tx).unwrap();
    assert_eq!(pb.num_constraints(), 1);
    assert_eq!(pb.val(fee), Fr::one());
    assert!(pb.is_satisfied());
}

/// Packs two bytes, unpacks them again through a second word and checks
/// that the exported system agrees with the protoboard.
#[test]
fn exported_system_matches_protoboard() {
    let mut pb = Protoboard::<Fr>::with_expected_size(FieldType::R1P, 64);
    let source: DualWordArray = (0..2)
        .map(|i| DualWord::new(&mut pb, 8, &format!("src{}", i)))
        .collect();
    let target: DualWordArray = (0..2)
        .map(|i| DualWord::new(&mut pb, 8, &format!("dst{}", i)))
        .collect();
    // The first packed source word is the public input.
    pb.set_num_primary_inputs(1);

    let pack =
        DualWordArrayGadget::create(&mut pb, source.clone(), PackingMode::Pack);
    let unpack =
        DualWordArrayGadget::create(&mut pb, target.clone(), PackingMode::Unpack);
    pack.generate_constraints(&mut pb);
    unpack.generate_constraints(&mut pb);
    for (src, dst) in source.packed().iter().zip(target.packed()) {
        pb.add_constraint(*src, LinearCombination::one(), dst, "src == dst");
    }

    for (i, byte) in [0x5au64, 0xc3].iter().enumerate() {
        let word = source.at(i);
        for bit in 0..8 {
            pb.set_val(word.bit(bit), Fr::from((byte >> bit) & 1));
        }
    }
    pack.generate_witness(&mut pb).unwrap();
    for (src, dst) in source.packed().iter().zip(target.packed()) {
        pb.set_val(dst, pb.val(*src));
    }
    unpack.generate_witness(&mut pb).unwrap();
    assert!(pb.is_satisfied());
    assert_eq!(pb.val(target.at(1).bit(7)), Fr::one());

    let example = pb.to_r1cs_example();
    let cs = &example.constraint_system;
    assert_eq!(cs.num_constraints(), pb.num_constraints());
    assert_eq!(cs.num_variables(), pb.num_variables());
    assert_eq!(example.primary_input, vec![Fr::from(0x5au64)]);
    assert!(cs.is_valid());
    assert!(example.is_satisfied());

    let mut text = Vec::new();
    cs.write_text(&mut text).unwrap();
    let read = ConstraintSystem::<Fr>::read_text(text.as_slice()).unwrap();
    assert!(read.is_satisfied(&example.primary_input, &example.auxiliary_input));
}

fn random_example_is_satisfied<F>()
where
    F: PrimeField,
{
    let rng = &mut ark_std::test_rng();
    let example = R1csExample::<F>::random(100, 10, rng);
    assert!(example.constraint_system.is_valid());
    assert!(example.is_satisfied());
}

#[test]
fn random_example_on_bls12_381() {
    random_example_is_satisfied::<ark_bls12_381::Fr>();
}

#[test]
fn random_example_on_bls12_377() {
    random_example_is_satisfied::<ark_bls12_377::Fr>();
}
