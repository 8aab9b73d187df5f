use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use mimc_accumulator::hash::{compress, permute, MimcParameters, MIMC_PARAMETERS_V1_ID};
use mimc_accumulator::merkle::{empty_root, TracingSink};
use mimc_accumulator::{
    AccumulatorError, AccumulatorResult, FieldElement, FieldElementOps, FrontierAccumulator, Mimc,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_VECTORS: &str = "vectors/accumulator.json";

#[derive(Debug, Clone, PartialEq, Eq)]
enum VectorError {
    Accumulator(AccumulatorError),
    /// Batch insertion of a whole case ended on a different root than the
    /// last single insertion.
    BatchDiverged {
        height: usize,
        single: FieldElement,
        batch: FieldElement,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::Accumulator(err) => write!(f, "{}", err),
            VectorError::BatchDiverged {
                height,
                single,
                batch,
            } => write!(
                f,
                "height {}: batch root {} differs from single-insert root {}",
                height, batch, single
            ),
        }
    }
}

impl From<AccumulatorError> for VectorError {
    fn from(err: AccumulatorError) -> Self {
        VectorError::Accumulator(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct VectorSet {
    parameters: ParameterVector,
    permutations: Vec<PermutationVector>,
    compressions: Vec<CompressionVector>,
    empty_roots: Vec<EmptyRootVector>,
    accumulators: Vec<AccumulatorVector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ParameterVector {
    id: String,
    seed: String,
    rounds: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PermutationVector {
    x: FieldElement,
    key: FieldElement,
    output: FieldElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompressionVector {
    inputs: Vec<FieldElement>,
    key: FieldElement,
    output: FieldElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EmptyRootVector {
    height: usize,
    root: FieldElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AccumulatorVector {
    height: usize,
    leaves: Vec<FieldElement>,
    roots: Vec<FieldElement>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let mut check = false;
    let mut path = PathBuf::from(DEFAULT_VECTORS);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--check" => check = true,
            "--vectors" => {
                if let Some(value) = args.next() {
                    path = PathBuf::from(value);
                }
            }
            _ => {}
        }
    }

    let computed = match build_vectors() {
        Ok(set) => set,
        Err(err) => {
            error!(%err, "failed to compute vectors");
            return ExitCode::FAILURE;
        }
    };

    if !check {
        match serde_json::to_string_pretty(&computed) {
            Ok(json) => {
                println!("{json}");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                error!(%err, "failed to encode vectors");
                return ExitCode::FAILURE;
            }
        }
    }

    let stored: VectorSet = match fs::read(&path)
        .map_err(|err| err.to_string())
        .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|err| err.to_string()))
    {
        Ok(set) => set,
        Err(err) => {
            error!(path = %path.display(), %err, "failed to load stored vectors");
            return ExitCode::FAILURE;
        }
    };

    if stored == computed {
        info!(path = %path.display(), "vectors match");
        ExitCode::SUCCESS
    } else {
        report_mismatches(&stored, &computed);
        ExitCode::FAILURE
    }
}

fn build_vectors() -> Result<VectorSet, VectorError> {
    let params = MimcParameters::DEFAULT;
    let hasher = Mimc::new(params).map_err(AccumulatorError::from)?;
    let top = FieldElement::ZERO.sub(&FieldElement::ONE);

    let permutations = [
        (small(0), small(0)),
        (small(1), small(2)),
        (small(7), small(0)),
        (top, top),
    ]
    .into_iter()
    .map(|(x, key)| PermutationVector {
        x,
        key,
        output: permute(x, key),
    })
    .collect();

    let compressions = [
        (vec![small(1), small(2)], small(0)),
        (vec![small(0), small(0)], small(0)),
        (vec![small(3)], small(5)),
        (vec![small(1), small(2), small(3)], small(7)),
        (Vec::new(), small(9)),
        (vec![top, top], small(0)),
    ]
    .into_iter()
    .map(|(inputs, key)| {
        let output = compress(&inputs, key);
        CompressionVector {
            inputs,
            key,
            output,
        }
    })
    .collect();

    let empty_roots = [1usize, 2, 4, 32]
        .into_iter()
        .map(|height| EmptyRootVector {
            height,
            root: empty_root(&hasher, height),
        })
        .collect();

    let accumulators = vec![
        accumulator_vector::<2>(&(1..=4).map(small).collect::<Vec<_>>())?,
        accumulator_vector::<4>(&(1..=16).map(small).collect::<Vec<_>>())?,
        accumulator_vector::<32>(&[small(1), small(2)])?,
    ];

    Ok(VectorSet {
        parameters: ParameterVector {
            id: MIMC_PARAMETERS_V1_ID.to_string(),
            seed: hex::encode(params.seed),
            rounds: params.rounds,
        },
        permutations,
        compressions,
        empty_roots,
        accumulators,
    })
}

fn small(value: u64) -> FieldElement {
    FieldElement::from(value)
}

fn accumulator_vector<const HEIGHT: usize>(
    leaves: &[FieldElement],
) -> Result<AccumulatorVector, VectorError> {
    let mut single = FrontierAccumulator::<HEIGHT>::new();
    let roots = leaves
        .iter()
        .map(|leaf| single.insert_leaf(*leaf))
        .collect::<AccumulatorResult<Vec<_>>>()?;

    let mut batch = FrontierAccumulator::<HEIGHT, TracingSink>::with_sink(TracingSink);
    let batch_root = batch.insert_leaves(leaves)?;
    check_batch_agrees(HEIGHT, &roots, batch_root)?;

    Ok(AccumulatorVector {
        height: HEIGHT,
        leaves: leaves.to_vec(),
        roots,
    })
}

fn check_batch_agrees(
    height: usize,
    single_roots: &[FieldElement],
    batch: FieldElement,
) -> Result<(), VectorError> {
    match single_roots.last() {
        Some(&single) if single != batch => Err(VectorError::BatchDiverged {
            height,
            single,
            batch,
        }),
        _ => Ok(()),
    }
}

fn report_mismatches(stored: &VectorSet, computed: &VectorSet) {
    if stored.parameters != computed.parameters {
        error!(
            stored = ?stored.parameters,
            computed = ?computed.parameters,
            "parameter mismatch"
        );
    }
    if stored.permutations != computed.permutations {
        error!("permutation vectors mismatch");
    }
    if stored.compressions != computed.compressions {
        error!("compression vectors mismatch");
    }
    if stored.empty_roots != computed.empty_roots {
        error!("empty root vectors mismatch");
    }
    for (expected, actual) in stored.accumulators.iter().zip(&computed.accumulators) {
        if expected != actual {
            error!(height = expected.height, "accumulator roots mismatch");
        }
    }
    if stored.accumulators.len() != computed.accumulators.len() {
        error!(
            stored = stored.accumulators.len(),
            computed = computed.accumulators.len(),
            "accumulator case count mismatch"
        );
    }
}
