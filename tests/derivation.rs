use cdma_params::cdma::{FrequencyResolution, TrainingAlgorithm};
use cdma_params::phy::{Modulation, ModulationInfo};
use cdma_params::utils::logging::init_logging;
use cdma_params::{CdmaConfig, CdmaParameters, Diagnostic, ParamsError};

#[test]
fn reference_link_parameters() {
    init_logging();
    let params = CdmaParameters::derive(&CdmaConfig::default())
        .expect("reference configuration should derive");

    assert_eq!(params.header.bits_per_header, 36);
    assert_eq!(params.header.symbols_per_header, 36);
    assert_eq!(params.header_format.bits_per_symbol, 1);

    assert_eq!(params.payload.payload_bytes, 50);
    assert_eq!(params.payload.coded_payload_bytes, 54);
    assert_eq!(params.payload.coded_payload_symbols, 216);

    assert_eq!(params.frame.symbols_per_frame, 252);
    assert_eq!(params.frame.chips_per_frame, 2016);

    let grid = &params.acquisition;
    let df = 1.0 / 4032.0;
    assert_eq!(grid.df, df);
    assert_eq!(grid.frequencies.len(), 51);
    assert_eq!(grid.frequencies[25], 0.0);
    assert!((grid.frequencies[0] + 25.0 * df).abs() < 1e-15);
    assert!((grid.frequencies[50] - 25.0 * df).abs() < 1e-15);
    assert_eq!(grid.peak_over_variance, 672.0);

    assert!(params.spreading.is_orthogonal());
    assert!(params.diagnostics.is_empty());
}

#[test]
fn derivation_is_reproducible() {
    init_logging();
    let config = CdmaConfig::default();
    let a = CdmaParameters::derive(&config).unwrap();
    let b = CdmaParameters::derive(&config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());

    let lfsr = CdmaConfig {
        training_algorithm: TrainingAlgorithm::Lfsr { poly: 0x1100b },
        ..CdmaConfig::default()
    };
    let a = CdmaParameters::derive(&lfsr).unwrap();
    let b = CdmaParameters::derive(&lfsr).unwrap();
    assert_eq!(a.training.full_sequence, b.training.full_sequence);
}

#[test]
fn geometry_invariants_across_modulations() {
    init_logging();
    let modulations = [
        Modulation::Bpsk,
        Modulation::Qpsk,
        Modulation::Psk8,
        Modulation::Qam16,
        Modulation::Qam32,
        Modulation::Qam64,
        Modulation::Qam256,
        Modulation::Custom { bits_per_symbol: 7 },
    ];
    for header_mod in modulations {
        for payload_mod in modulations {
            for payload_bytes in [1, 13, 50, 255] {
                let config = CdmaConfig {
                    header_mod,
                    payload_mod,
                    payload_bytes,
                    ..CdmaConfig::default()
                };
                let params = CdmaParameters::derive(&config).unwrap();
                let hb = header_mod.bits_per_symbol();
                let pb = payload_mod.bits_per_symbol();

                assert_eq!(params.header.bits_per_header, params.header.symbols_per_header * hb);
                assert!(params.header.bits_per_header >= 36);
                assert!(params.header.bits_per_header < 36 + hb);

                assert_eq!(
                    params.payload.coded_payload_bytes * 8,
                    params.payload.coded_payload_symbols * pb
                );
                assert!(params.payload.coded_payload_bytes >= payload_bytes + 4);

                assert_eq!(
                    params.frame.symbols_per_frame,
                    params.header.symbols_per_header + params.payload.coded_payload_symbols
                );
                assert_eq!(params.frame.chips_per_frame, 8 * params.frame.symbols_per_frame);
                assert_eq!(params.training.full_sequence.len(), params.frame.symbols_per_frame);

                let f = &params.acquisition.frequencies;
                let n = f.len();
                assert_eq!(n % 2, 1);
                assert_eq!(f[n / 2], 0.0);
                assert!(f.windows(2).all(|w| w[0] < w[1]));
                assert!((0..n).all(|i| f[i] == -f[n - 1 - i]));
            }
        }
    }
}

#[test]
fn corrections_are_reported() {
    init_logging();
    let config = CdmaConfig::from_json_str(
        r#"{ "header_mod": "8psk", "payload_mod": "32qam", "training_length": 1000 }"#,
    )
    .unwrap();
    let params = CdmaParameters::derive(&config).unwrap();
    assert_eq!(
        params.diagnostics,
        vec![
            Diagnostic::PayloadAdjusted {
                requested_bytes: 50,
                adjusted_bytes: 51
            },
            Diagnostic::TrainingLengthClamped {
                requested: 1000,
                max: params.frame.symbols_per_frame
            },
        ]
    );
}

#[test]
fn loop_bandwidth_resolution() {
    init_logging();
    let config = CdmaConfig {
        frequency_resolution: FrequencyResolution::LoopBandwidthLimited,
        ..CdmaConfig::default()
    };
    let params = CdmaParameters::derive(&config).unwrap();
    assert_eq!(params.acquisition.df, 0.005 / 8.0);
    assert_eq!(params.acquisition.df1, 1.0 / 4032.0);
}

#[test]
fn configuration_defects_fail_fast() {
    init_logging();
    let even = CdmaConfig {
        num_filters: 50,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&even),
        Err(ParamsError::InvalidFilterCount(50))
    ));

    let correlated = CdmaConfig {
        pulse_data: vec![1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0],
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&correlated),
        Err(ParamsError::NonOrthogonalSpreadingCodes { .. })
    ));

    let short_pulse = CdmaConfig {
        chips_per_symbol: 16,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&short_pulse),
        Err(ParamsError::SpreadingCodeLength { .. })
    ));

    let power = CdmaConfig {
        training_percent: 120.0,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&power),
        Err(ParamsError::OutOfRange { .. })
    ));
}

#[test]
fn oversized_configurations_are_rejected() {
    init_logging();
    let payload = CdmaConfig {
        payload_bytes: usize::MAX / 4,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&payload),
        Err(ParamsError::OutOfRange { name: "coded_payload_bits", .. })
    ));

    let long_frame = CdmaConfig {
        payload_bytes: 1 << 30,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&long_frame),
        Err(ParamsError::OutOfRange { name: "symbols_per_frame", .. })
    ));

    let chips = CdmaConfig {
        chips_per_symbol: usize::MAX / 8,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&chips),
        Err(ParamsError::OutOfRange { name: "chips_per_frame", .. })
    ));

    let filters = CdmaConfig {
        num_filters: usize::MAX,
        ..CdmaConfig::default()
    };
    assert!(matches!(
        CdmaParameters::derive(&filters),
        Err(ParamsError::InvalidFilterCount(usize::MAX))
    ));
}
