use std::fmt::Write;

use savedmodel_core::{ArtifactCatalog, MetaGraphInfo, SignatureDefEntry, TensorInfo};

pub fn render_catalog(catalog: &ArtifactCatalog) -> String {
    let mut out = String::new();
    for (i, meta_graph) in catalog.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_meta_graph(meta_graph));
    }
    out
}

pub fn render_meta_graph(meta_graph: &MetaGraphInfo) -> String {
    let mut out = format!(
        "MetaGraphDef with tag-set: {} contains the following SignatureDefs:\n",
        meta_graph.tags
    );
    for (name, signature) in &meta_graph.signature_defs {
        out.push('\n');
        out.push_str(&render_signature(name, signature));
    }
    out
}

pub fn render_signature(name: &str, signature: &SignatureDefEntry) -> String {
    let mut out = format!("signature_def['{name}']:\n");
    out.push_str("  inputs:\n");
    for (key, info) in &signature.inputs {
        render_tensor(&mut out, "inputs", key, info);
    }
    out.push_str("  outputs:\n");
    for (key, info) in &signature.outputs {
        render_tensor(&mut out, "outputs", key, info);
    }
    if !signature.method_name.is_empty() {
        let _ = writeln!(out, "  method name: {}", signature.method_name);
    }
    out
}

fn render_tensor(out: &mut String, side: &str, key: &str, info: &TensorInfo) {
    let _ = writeln!(out, "    {side}['{key}'] tensor_info:");
    let _ = writeln!(out, "        dtype: {} ({})", info.native_dtype, info.dtype);
    let _ = writeln!(out, "        shape: {}", render_shape(&info.shape));
    let _ = writeln!(out, "        name: {}", info.name);
}

fn render_shape(shape: &[i64]) -> String {
    let dims = shape
        .iter()
        .map(|d| if *d < 0 { "?".to_string() } else { d.to_string() })
        .collect::<Vec<_>>();
    format!("({})", dims.join(", "))
}
