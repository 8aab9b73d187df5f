
use _fixtures::{felts, vectors, AccumulatorVector};
use mimc_accumulator::hash::{
    compress, permute, MimcParameters, MIMC_PARAMETERS_V1_ID, MIMC_ROUNDS, MIMC_SEED,
};
use mimc_accumulator::merkle::{empty_root, RecordingSink};
use mimc_accumulator::{FieldElement, FrontierAccumulator, Mimc};

#[test]
fn parameter_set_matches_vectors() {
    let parameters = &vectors().parameters;
    assert_eq!(parameters.id, MIMC_PARAMETERS_V1_ID);
    assert_eq!(parameters.seed, hex::encode(MIMC_SEED));
    assert_eq!(parameters.rounds, MIMC_ROUNDS);
    assert_eq!(MimcParameters::default().rounds, parameters.rounds);
}

#[test]
fn permutation_vectors() {
    for case in &vectors().permutations {
        assert_eq!(permute(case.x, case.key), case.output, "x = {}, key = {}", case.x, case.key);
    }
}

#[test]
fn compression_vectors() {
    let hasher = Mimc::public();
    for case in &vectors().compressions {
        assert_eq!(compress(&case.inputs, case.key), case.output);
        assert_eq!(hasher.compress(&case.inputs, case.key), case.output);
    }
}

#[test]
fn empty_root_vectors() {
    let hasher = Mimc::public();
    for case in &vectors().empty_roots {
        assert_eq!(empty_root(&hasher, case.height), case.root, "height {}", case.height);
    }
    assert_eq!(FrontierAccumulator::<2>::new().root(), vectors().empty_roots[1].root);
    assert_eq!(FrontierAccumulator::<32>::new().root(), vectors().empty_roots[3].root);
}

#[test]
fn accumulator_root_sequences() {
    for case in &vectors().accumulators {
        match case.height {
            2 => run::<2>(case),
            4 => run::<4>(case),
            32 => run::<32>(case),
            other => panic!("no accumulator instantiation for height {other}"),
        }
    }
}

fn run<const HEIGHT: usize>(case: &AccumulatorVector) {
    let mut single = FrontierAccumulator::<HEIGHT>::new();
    for (index, (leaf, expected)) in case.leaves.iter().zip(&case.roots).enumerate() {
        let root = single.insert_leaf(*leaf).expect("capacity");
        assert_eq!(root, *expected, "height {HEIGHT}, leaf {index}");
    }

    let mut batch = FrontierAccumulator::<HEIGHT, RecordingSink>::with_sink(RecordingSink::new());
    let root = batch.insert_leaves(&case.leaves).expect("capacity");
    assert_eq!(Some(&root), case.roots.last());
    assert_eq!(batch.leaf_count(), case.leaves.len() as u64);
    assert_eq!(batch.frontier(), single.frontier());
    assert_eq!(batch.sink().len(), 1);
}

#[test]
fn first_leaf_root_is_pinned() {
    let mut accumulator = FrontierAccumulator::<2>::new();
    let root = accumulator.insert_leaf(FieldElement::from(1u64)).unwrap();
    insta::assert_snapshot!(
        root.to_hex(),
        @"0x1ea886b553c48f99b8c68f4fd5a369bf1b2e742d0aa62956d5ee73e4ae0173c3"
    );
}

#[test]
fn truncated_batch_matches_full_tree() {
    // Leaves 17..=20 fall off the end of a height-4 tree.
    let mut accumulator = FrontierAccumulator::<4>::new();
    let root = accumulator.insert_leaves(&felts(1..=20)).unwrap();
    assert!(accumulator.is_full());
    assert_eq!(accumulator.leaf_count(), 16);
    insta::assert_snapshot!(
        root.to_hex(),
        @"0x13f2070f6bc18920800852386b3536b783ee7ffc6cdbbaa4128fb9fef1c9b5b2"
    );
}

#[test]
fn split_batches_reach_pinned_root() {
    let leaves = felts(1..=16);
    let expected = vectors().accumulators[1].roots[4];
    let mut accumulator = FrontierAccumulator::<4>::new();
    accumulator.insert_leaves(&leaves[..3]).unwrap();
    let root = accumulator.insert_leaves(&leaves[3..5]).unwrap();
    assert_eq!(root, expected);
    assert_eq!(
        expected.to_hex(),
        "0x06d50e67812a4c514f839a7c6576efa5ecb745e5507c3d7989312c48545e1cf1"
    );
}
