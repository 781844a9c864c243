//! Wire types for the parts of a `saved_model.pb` descriptor that signature
//! binding reads.
//!
//! Field tags follow `tensorflow/core/protobuf/{saved_model,meta_graph}.proto`
//! and `tensorflow/core/framework/{types,tensor_shape}.proto`. Fields that are
//! not modeled here (graph defs, saver defs, collections, object graphs) are
//! skipped by the decoder.

use std::collections::BTreeMap;

use prost::Message;

mod dtype;

pub use dtype::DataType;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedModel {
    #[prost(int64, tag = "1")]
    pub saved_model_schema_version: i64,
    #[prost(message, repeated, tag = "2")]
    pub meta_graphs: Vec<MetaGraphDef>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MetaGraphDef {
    #[prost(message, optional, tag = "1")]
    pub meta_info_def: Option<meta_graph_def::MetaInfoDef>,
    #[prost(btree_map = "string, message", tag = "5")]
    pub signature_def: BTreeMap<String, SignatureDef>,
}

pub mod meta_graph_def {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MetaInfoDef {
        #[prost(string, tag = "1")]
        pub meta_graph_version: String,
        #[prost(string, repeated, tag = "4")]
        pub tags: Vec<String>,
        #[prost(string, tag = "5")]
        pub tensorflow_version: String,
        #[prost(string, tag = "6")]
        pub tensorflow_git_version: String,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureDef {
    #[prost(btree_map = "string, message", tag = "1")]
    pub inputs: BTreeMap<String, TensorInfo>,
    #[prost(btree_map = "string, message", tag = "2")]
    pub outputs: BTreeMap<String, TensorInfo>,
    #[prost(string, tag = "3")]
    pub method_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorInfo {
    #[prost(enumeration = "DataType", tag = "2")]
    pub dtype: i32,
    #[prost(message, optional, tag = "3")]
    pub tensor_shape: Option<TensorShapeProto>,
    #[prost(oneof = "tensor_info::Encoding", tags = "1, 4, 5")]
    pub encoding: Option<tensor_info::Encoding>,
}

pub mod tensor_info {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Encoding {
        /// Dense tensor, referenced by its graph-internal name (`op:index`).
        #[prost(string, tag = "1")]
        Name(String),
        #[prost(message, tag = "4")]
        CooSparse(CooSparse),
        /// Ragged tensors and other composites, encoded through their components.
        #[prost(message, tag = "5")]
        CompositeTensor(CompositeTensor),
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CooSparse {
        #[prost(string, tag = "1")]
        pub values_tensor_name: String,
        #[prost(string, tag = "2")]
        pub indices_tensor_name: String,
        #[prost(string, tag = "3")]
        pub dense_shape_tensor_name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CompositeTensor {
        #[prost(message, repeated, tag = "2")]
        pub components: Vec<super::TensorInfo>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorShapeProto {
    #[prost(message, repeated, tag = "2")]
    pub dim: Vec<tensor_shape_proto::Dim>,
    #[prost(bool, tag = "3")]
    pub unknown_rank: bool,
}

pub mod tensor_shape_proto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Dim {
        /// `-1` marks an unknown dimension.
        #[prost(int64, tag = "1")]
        pub size: i64,
        #[prost(string, tag = "2")]
        pub name: String,
    }
}

/// Decode the raw bytes of a `saved_model.pb` descriptor.
pub fn decode_saved_model(bytes: &[u8]) -> Result<SavedModel, prost::DecodeError> {
    SavedModel::decode(bytes)
}
