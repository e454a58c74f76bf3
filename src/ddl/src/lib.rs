// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! DDL lexer and declarative property-grammar engine.
//!
//! This crate implements the syntax layer of Floe. A resource's keyword
//! syntax is described declaratively by a [`props::Props`] schema: an
//! ordered table of [`props::Prop`] descriptors, each of which knows how to
//! render one keyword/value unit of DDL and how to recognize it in a token
//! stream. One generic engine renders and parses any schema; the resource
//! catalog lives upstream in `floe-model` and registers schemas as data.
//!
//! The lexical grammar is the usual SQL one: case-insensitive bare words,
//! single-quoted string literals with `''` escaping, double-quoted
//! identifiers, `--` and `/* */` comments.

#[macro_use]
pub mod display;

pub mod lexer;
pub mod parser;
pub mod props;
pub mod value;
