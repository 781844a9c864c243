use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, bail, Context};
use bytes::Bytes;
use parking_lot::Mutex;
use prost::Message;
use savedmodel_core::{
    DType, Error, ExecutionEngine, InferenceModel, SessionId, Shape, SignatureDefEntry, TagSet,
    Tensor, TensorInfo, SAVED_MODEL_FILE_NAME,
};
use savedmodel_proto::{
    meta_graph_def::MetaInfoDef, tensor_info::Encoding, tensor_shape_proto::Dim, DataType,
    MetaGraphDef, SavedModel, SignatureDef, TensorShapeProto,
};
use savedmodel_runtime::{ArtifactRegistry, LoadOptions, ModelHandle, SavedModelLoader};

/// Engine double that hands out a fixed session id and records every call.
#[derive(Default)]
struct RecordingEngine {
    session: u64,
    created: Mutex<Vec<(PathBuf, TagSet)>>,
    destroyed: Mutex<Vec<SessionId>>,
    runs: Mutex<Vec<(SessionId, Vec<String>, Vec<String>)>>,
}

impl RecordingEngine {
    fn with_session(session: u64) -> Arc<Self> {
        Arc::new(Self {
            session,
            ..Default::default()
        })
    }

    fn created(&self) -> usize {
        self.created.lock().len()
    }

    fn destroyed(&self) -> Vec<SessionId> {
        self.destroyed.lock().clone()
    }
}

impl ExecutionEngine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn create_or_get_session(&self, path: &Path, tags: &TagSet) -> anyhow::Result<SessionId> {
        self.created.lock().push((path.to_path_buf(), tags.clone()));
        Ok(SessionId(self.session))
    }

    fn destroy_session(&self, session: SessionId) -> anyhow::Result<()> {
        self.destroyed.lock().push(session);
        Ok(())
    }

    fn run(
        &self,
        session: SessionId,
        inputs: Vec<(String, Tensor)>,
        outputs: &[String],
    ) -> anyhow::Result<Vec<Tensor>> {
        let feeds = inputs.iter().map(|(name, _)| name.clone()).collect();
        self.runs.lock().push((session, feeds, outputs.to_vec()));
        let first = inputs.into_iter().next().map(|(_, t)| t).context("no inputs")?;
        Ok(outputs.iter().map(|_| first.clone()).collect())
    }
}

struct FailingEngine;

impl ExecutionEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn create_or_get_session(&self, _path: &Path, _tags: &TagSet) -> anyhow::Result<SessionId> {
        Ok(SessionId(1))
    }

    fn destroy_session(&self, _session: SessionId) -> anyhow::Result<()> {
        bail!("session teardown failed")
    }

    fn run(
        &self,
        _session: SessionId,
        _inputs: Vec<(String, Tensor)>,
        _outputs: &[String],
    ) -> anyhow::Result<Vec<Tensor>> {
        Ok(Vec::new())
    }
}

/// Engine double that counts live sessions and notes any moment where two
/// sessions for the same artifact exist at once.
#[derive(Default)]
struct CountingEngine {
    next_session: AtomicU64,
    live: AtomicUsize,
    max_live: AtomicUsize,
    created: AtomicUsize,
    destroyed: AtomicUsize,
}

impl ExecutionEngine for CountingEngine {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn create_or_get_session(&self, _path: &Path, _tags: &TagSet) -> anyhow::Result<SessionId> {
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(SessionId(self.next_session.fetch_add(1, Ordering::SeqCst)))
    }

    fn destroy_session(&self, _session: SessionId) -> anyhow::Result<()> {
        if self.live.fetch_sub(1, Ordering::SeqCst) == 0 {
            bail!("destroyed a session that was never created");
        }
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn run(
        &self,
        _session: SessionId,
        _inputs: Vec<(String, Tensor)>,
        _outputs: &[String],
    ) -> anyhow::Result<Vec<Tensor>> {
        Ok(Vec::new())
    }
}

fn tensor_info(name: &str, shape: Vec<i64>) -> TensorInfo {
    TensorInfo {
        name: name.to_string(),
        dtype: DType::Float32,
        native_dtype: "DT_FLOAT".to_string(),
        shape,
    }
}

fn predict_signature() -> SignatureDefEntry {
    SignatureDefEntry {
        inputs: BTreeMap::from([
            ("x".to_string(), tensor_info("input_x:0", vec![-1, 4])),
            ("mask".to_string(), tensor_info("mask", vec![-1])),
        ]),
        outputs: BTreeMap::from([("y".to_string(), tensor_info("output:0", vec![-1, 1]))]),
        method_name: "tensorflow/serving/predict".to_string(),
    }
}

fn bind(
    registry: &Arc<ArtifactRegistry>,
    engine: Arc<dyn ExecutionEngine>,
    path: &str,
) -> savedmodel_core::Result<ModelHandle> {
    ModelHandle::new(
        registry.clone(),
        engine,
        Path::new(path),
        &TagSet::serve(),
        "predict",
        predict_signature(),
    )
}

fn f32_tensor(values: &[f32]) -> Tensor {
    let data = values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>();
    Tensor::from_bytes(DType::Float32, Shape::from_slice(&[values.len()]), Bytes::from(data))
}

#[test]
fn same_artifact_shares_one_session() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(7);

    let mut a = bind(&registry, engine.clone(), "/m")?;
    let mut b = bind(&registry, engine.clone(), "/m")?;

    assert_ne!(a.handle_id(), b.handle_id());
    assert_eq!(a.session_id(), SessionId(7));
    assert_eq!(b.session_id(), SessionId(7));
    assert_eq!(engine.created(), 1);
    assert_eq!(registry.session_references(SessionId(7)), 2);

    a.dispose()?;
    assert!(engine.destroyed().is_empty());
    assert_eq!(registry.entry(b.handle_id()).map(|e| e.session), Some(SessionId(7)));

    b.dispose()?;
    assert_eq!(engine.destroyed(), vec![SessionId(7)]);
    assert!(registry.is_empty());
    Ok(())
}

#[test]
fn teardown_is_independent_of_disposal_order() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(7);

    let mut a = bind(&registry, engine.clone(), "/m")?;
    let mut b = bind(&registry, engine.clone(), "/m")?;

    b.dispose()?;
    assert!(engine.destroyed().is_empty());
    a.dispose()?;
    assert_eq!(engine.destroyed(), vec![SessionId(7)]);
    Ok(())
}

#[test]
fn different_paths_get_their_own_sessions() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(3);

    let _a = bind(&registry, engine.clone(), "/m1")?;
    let _b = bind(&registry, engine.clone(), "/m2")?;

    assert_eq!(engine.created(), 2);
    assert_eq!(registry.len(), 2);
    Ok(())
}

#[test]
fn disposing_twice_fails() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(1);

    let mut handle = bind(&registry, engine.clone(), "/m")?;
    handle.dispose()?;
    assert!(handle.is_disposed());

    let err = handle.dispose().unwrap_err();
    assert!(matches!(err, Error::AlreadyDisposed { handle: id } if id == handle.handle_id()));
    assert_eq!(engine.destroyed().len(), 1);
    Ok(())
}

#[test]
fn dropping_a_live_handle_releases_it() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(5);

    let a = bind(&registry, engine.clone(), "/m")?;
    let mut b = bind(&registry, engine.clone(), "/m")?;
    drop(a);
    assert_eq!(registry.len(), 1);
    assert!(engine.destroyed().is_empty());

    b.dispose()?;
    drop(b);
    assert_eq!(engine.destroyed(), vec![SessionId(5)]);
    Ok(())
}

#[test]
fn failed_teardown_is_reported_and_handle_stays_disposed() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let mut handle = bind(&registry, Arc::new(FailingEngine), "/m")?;

    let err = handle.dispose().unwrap_err();
    assert!(matches!(err, Error::Engine(_)));
    assert!(err.to_string().contains("#1"), "{err}");
    assert!(registry.is_empty());
    assert!(matches!(handle.dispose(), Err(Error::AlreadyDisposed { .. })));
    Ok(())
}

#[test]
fn accessors_strip_output_suffix_and_are_repeatable() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let handle = bind(&registry, RecordingEngine::with_session(1), "/m")?;

    let inputs = handle.inputs();
    let names = inputs.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
    // keys iterate in order: "mask", "x"
    assert_eq!(names, vec!["mask", "input_x"]);
    assert_eq!(inputs[1].shape, vec![-1, 4]);
    assert_eq!(handle.outputs()[0].name, "output");

    assert_eq!(handle.inputs(), inputs);
    assert_eq!(handle.outputs(), handle.outputs());
    // the bound signature keeps graph-internal names
    assert_eq!(handle.signature().outputs["y"].name, "output:0");
    Ok(())
}

#[test]
fn predict_feeds_graph_names_and_keys_results() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(2);
    let handle = bind(&registry, engine.clone(), "/m")?;

    let x = f32_tensor(&[1.0, 2.0, 3.0, 4.0]);
    let outputs = handle.predict(vec![
        ("x".to_string(), x.clone()),
        ("mask".to_string(), f32_tensor(&[1.0])),
    ])?;

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].0, "y");

    let runs = engine.runs.lock();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].0, SessionId(2));
    assert_eq!(runs[0].1, vec!["mask".to_string(), "input_x:0".to_string()]);
    assert_eq!(runs[0].2, vec!["output:0".to_string()]);
    Ok(())
}

#[test]
fn predict_rejects_bad_inputs() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let mut handle = bind(&registry, RecordingEngine::with_session(2), "/m")?;

    let err = handle
        .predict(vec![("z".to_string(), f32_tensor(&[0.0]))])
        .unwrap_err();
    assert!(matches!(err, Error::UnknownInput { ref input, .. } if input == "z"));

    let err = handle
        .predict(vec![("x".to_string(), f32_tensor(&[0.0]))])
        .unwrap_err();
    assert!(matches!(err, Error::MissingInput { ref input, .. } if input == "mask"));

    handle.dispose()?;
    let err = handle
        .predict(vec![("x".to_string(), f32_tensor(&[0.0]))])
        .unwrap_err();
    assert!(matches!(err, Error::HandleDisposed { .. }));
    Ok(())
}

#[test]
fn predict_rejects_repeated_input_keys() -> anyhow::Result<()> {
    let registry = Arc::new(ArtifactRegistry::new());
    let engine = RecordingEngine::with_session(2);
    let handle = bind(&registry, engine.clone(), "/m")?;

    let err = handle
        .predict(vec![
            ("x".to_string(), f32_tensor(&[1.0, 2.0, 3.0, 4.0])),
            ("mask".to_string(), f32_tensor(&[1.0])),
            ("x".to_string(), f32_tensor(&[5.0, 6.0, 7.0, 8.0])),
        ])
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateInput { ref input, .. } if input == "x"));
    assert!(err.to_string().contains("\"x\""), "{err}");
    assert!(engine.runs.lock().is_empty());
    Ok(())
}

#[test]
fn concurrent_bind_and_dispose_keep_one_session_alive() -> anyhow::Result<()> {
    const THREADS: usize = 12;
    const ROUNDS: usize = 200;

    let registry = Arc::new(ArtifactRegistry::new());
    let engine = Arc::new(CountingEngine::default());
    let (shared_registry, shared_engine) = (&registry, &engine);

    thread::scope(|scope| -> anyhow::Result<()> {
        let workers = (0..THREADS)
            .map(move |_| {
                scope.spawn(move || -> savedmodel_core::Result<()> {
                    for _ in 0..ROUNDS {
                        let mut first = bind(shared_registry, shared_engine.clone(), "/m")?;
                        let mut second = bind(shared_registry, shared_engine.clone(), "/m")?;
                        first.dispose()?;
                        second.dispose()?;
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();

        for worker in workers {
            worker.join().map_err(|_| anyhow!("worker thread panicked"))??;
        }
        Ok(())
    })?;

    assert!(registry.is_empty());
    assert_eq!(engine.max_live.load(Ordering::SeqCst), 1);
    assert_eq!(engine.live.load(Ordering::SeqCst), 0);
    let created = engine.created.load(Ordering::SeqCst);
    assert!(created >= 1);
    assert_eq!(created, engine.destroyed.load(Ordering::SeqCst));
    Ok(())
}

fn write_artifact(dir: &Path) -> anyhow::Result<()> {
    let input = savedmodel_proto::TensorInfo {
        dtype: DataType::DtFloat as i32,
        tensor_shape: Some(TensorShapeProto {
            dim: vec![
                Dim {
                    size: -1,
                    name: String::new(),
                },
                Dim {
                    size: 4,
                    name: String::new(),
                },
            ],
            unknown_rank: false,
        }),
        encoding: Some(Encoding::Name("serving_default_x:0".to_string())),
    };
    let output = savedmodel_proto::TensorInfo {
        encoding: Some(Encoding::Name("StatefulPartitionedCall:0".to_string())),
        ..input.clone()
    };
    let signature = SignatureDef {
        inputs: BTreeMap::from([("x".to_string(), input)]),
        outputs: BTreeMap::from([("y".to_string(), output)]),
        method_name: "tensorflow/serving/predict".to_string(),
    };
    let model = SavedModel {
        saved_model_schema_version: 1,
        meta_graphs: vec![MetaGraphDef {
            meta_info_def: Some(MetaInfoDef {
                tags: vec!["serve".to_string()],
                ..Default::default()
            }),
            signature_def: BTreeMap::from([("serving_default".to_string(), signature)]),
        }],
    };
    std::fs::write(dir.join(SAVED_MODEL_FILE_NAME), model.encode_to_vec())?;
    Ok(())
}

#[tokio::test]
async fn loader_binds_default_signature_and_reuses_sessions() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_artifact(dir.path())?;

    let engine = RecordingEngine::with_session(11);
    let loader = SavedModelLoader::new(Arc::new(ArtifactRegistry::new()), engine.clone());

    let mut first = loader.load(dir.path(), &LoadOptions::default()).await?;
    let mut second = loader.load(dir.path(), &LoadOptions::default()).await?;

    assert_eq!(first.signature_name(), "serving_default");
    assert_eq!(first.path(), dir.path());
    assert_eq!(first.inputs()[0].name, "serving_default_x");
    assert_eq!(first.outputs()[0].name, "StatefulPartitionedCall");
    assert_eq!(first.session_id(), second.session_id());
    assert_eq!(engine.created(), 1);

    first.dispose()?;
    second.dispose()?;
    assert_eq!(engine.destroyed(), vec![SessionId(11)]);
    assert!(loader.registry().is_empty());
    Ok(())
}

#[tokio::test]
async fn loader_reports_resolution_errors_without_creating_sessions() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_artifact(dir.path())?;

    let engine = RecordingEngine::with_session(1);
    let loader = SavedModelLoader::new(Arc::new(ArtifactRegistry::new()), engine.clone());

    let err = loader
        .load(dir.path(), &LoadOptions::default().with_signature("classify"))
        .await
        .err()
        .context("unknown signature should fail")?;
    assert!(matches!(err, Error::SignatureNotFound { .. }), "{err}");

    let err = loader
        .load(dir.path(), &LoadOptions::default().with_tags(["train"]))
        .await
        .err()
        .context("unknown tags should fail")?;
    assert!(err.to_string().contains(r#"["train"]"#), "{err}");

    let missing = dir.path().join("nope");
    let err = loader
        .load(&missing, &LoadOptions::default())
        .await
        .err()
        .context("missing artifact should fail")?;
    assert!(matches!(err, Error::ArtifactNotFound { .. }), "{err}");

    assert_eq!(engine.created(), 0);
    Ok(())
}
