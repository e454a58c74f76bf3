// Copyright Floe Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use floe_model::resource::Resource;

#[test]
fn datadriven() {
    use datadriven::walk;

    walk("tests/testdata", |f| {
        f.run(|tc| -> String {
            match tc.directive.as_str() {
                "parse" => {
                    let input = tc.input.trim();
                    match Resource::from_sql(input) {
                        Ok(resource) => {
                            // The canonical form must parse back to an equal
                            // record, and re-rendering must be a fixpoint.
                            let canonical = resource.to_sql();
                            match Resource::from_sql(&canonical) {
                                Ok(reparsed) if reparsed == resource => {
                                    format!("{}\n", canonical)
                                }
                                Ok(_) => "reparse comparison failed\n".to_string(),
                                Err(e) => format!("reparse failed: {}\n", e),
                            }
                        }
                        Err(e) => format!("error: {}\n", e),
                    }
                }
                dir => panic!("unhandled directive {}", dir),
            }
        })
    });
}
