#![allow(dead_code)]

/// Demo document of the MCell data-model reader.
pub const DEMO: &str = r#"{"A":true,"mc":[{"a":0.01},1e-5,2,true,[9,[0,3],"a",345],false,null,5,[1,2,3],"xyz"],"x":"y"}"#;

/// The same shape, padded with whitespace on both sides and nested deeper.
pub const SPACED: &str = r#" { "ALL" : [ 2, -1, {"a":1,"b":2,"c":3}, { "mc":[ { "a":0 }, 2, true, [9,[0,3],"a",3], false, null, 5, [1,2,3], "xyz" ], "x":"y" }, -3, 7 ] }  "#;

/// An excerpt of a CellBlender data model export.
pub const DATA_MODEL: &str = r#"
{"mcell": {"blender_version": [2, 68, 0], "api_version": 0,
 "define_molecules": {"molecule_list": [
   {"export_viz": false, "diffusion_constant": "1e-7", "mol_name": "a", "mol_type": "3D", "target_only": false},
   {"export_viz": false, "diffusion_constant": "1e-7", "mol_name": "b", "mol_type": "3D", "target_only": false}],
   "data_model_version": "DM_2014_10_24_1638"},
 "define_reactions": {"reaction_list": []},
 "initialization": {"iterations": "10", "time_step": "5e-6", "accurate_3d_reactions": true,
   "partitions": {"x_start": "-1.0", "x_step": "0.019999999552965164", "include": false}},
 "geometrical_objects": {"object_list": [{"name": "Cube",
   "vertex_list": [[-0.25, -0.25, -0.25], [-0.25, 0.25, -0.25], [0.25, 0.25, -0.25]],
   "element_connections": [[4, 5, 0], [5, 6, 1]], "location": [0.0, 0.0, 0.0]}]},
 "materials": {"material_dict": {}},
 "cellblender_version": "0.1.54"}}
"#;
