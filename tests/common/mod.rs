#![allow(dead_code)]

use assert_fs::prelude::*;

pub const CASES_CSV: &str = "date,location_key,new_confirmed\n\
2020-12-31,US,50\n\
2021-01-01,US,100\n\
2021-01-02,US,\n\
2021-01-06,US,-20\n\
2021-01-06,US,60\n\
2021-01-11,US,80\n\
2021-01-20,US,40\n\
2021-02-03,US,30\n\
,US,999\n\
2021-02-04,US,12345\n";

pub const VARIANTS_JSON: &str = r#"{
  "regions": [
    {
      "region": "North America",
      "distributions": [
        {"country": "CAN", "distribution": [
          {"week": "2021-01-01", "total_sequences": 10, "cluster_counts": {"20I (Alpha, V1)": 10}}
        ]},
        {"country": "USA", "distribution": [
          {"week": "2021-01-11", "total_sequences": 100, "cluster_counts": {"21A (Delta)": 100}},
          {"week": "2021-01-01", "total_sequences": 100,
           "cluster_counts": {"21A (Delta)": 30, "21I (Delta, VOC)": 20, "20I (Alpha, V1)": 50}},
          {"week": "", "total_sequences": 100, "cluster_counts": {"21A (Delta)": 100}}
        ]}
      ]
    },
    {
      "region": "World",
      "distributions": [
        {"country": "USA", "distribution": [
          {"week": "2021-01-01", "total_sequences": 5, "cluster_counts": {"Gamma": 5}}
        ]}
      ]
    }
  ]
}"#;

pub fn write_inputs(dir: &assert_fs::TempDir, cases: &str, variants: &str) {
    dir.child("COVID_US_cases.csv").write_str(cases).unwrap();
    dir.child("perCountryData.json").write_str(variants).unwrap();
}

pub fn fraction_sum(map: &serde_json::Value) -> f64 {
    map.as_object()
        .unwrap()
        .values()
        .map(|value| value.as_f64().unwrap())
        .sum()
}
