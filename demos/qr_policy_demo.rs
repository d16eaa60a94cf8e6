//! (Q,R) 策略計算示例
//!
//! 用法：
//! ```text
//! cargo run --example qr_policy_demo
//! cargo run --example qr_policy_demo -- 10 50 5 20 1 100 20 0.95 "Type 2" yes
//! ```
//! 參數依序為單位成本、訂購成本、缺貨成本、年利率(%)、前置期(月)、月需求、月標準差、
//! 服務水準、服務水準類型、是否延期交貨。設定 `QR_SOLVER_CONFIG` 可指定 JSON 配置檔。

use anyhow::Context;
use qr_policy::{PolicyForm, PolicySolver, QrError, ServiceLevelType, SolverConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== (Q,R) 庫存策略計算示例 ===\n");

    let config = match std::env::var("QR_SOLVER_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("無法讀取配置檔 {}", path))?;
            SolverConfig::from_json_str(&json)?
        }
        Err(_) => SolverConfig::default(),
    };
    tracing::info!("求解器配置: {:?}", config);
    let solver = PolicySolver::new(config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let forms = if args.is_empty() {
        vec![
            sample_form(ServiceLevelType::Type1),
            sample_form(ServiceLevelType::Type2),
        ]
    } else {
        vec![form_from_args(&args)?]
    };

    for form in forms {
        println!("服務水準類型: {}，延期交貨: {}", form.service_level_type, form.backorder);

        let outcome = form
            .parse()
            .map_err(QrError::from)
            .and_then(|inputs| solver.solve(&inputs));
        match outcome {
            Ok(result) => {
                print!("{}", result);
                println!("每年訂購次數: {:.2}\n", result.orders_per_year());
            }
            Err(e) => println!("計算失敗: {}\n", e),
        }
    }

    Ok(())
}

fn sample_form(service_level_type: ServiceLevelType) -> PolicyForm {
    PolicyForm {
        unit_cost: "10".to_string(),
        ordering_cost: "50".to_string(),
        penalty_cost: "5".to_string(),
        interest_rate_percent: "20".to_string(),
        lead_time_months: "1".to_string(),
        monthly_demand: "100".to_string(),
        monthly_std_dev: "20".to_string(),
        service_level: "0.95".to_string(),
        service_level_type: service_level_type.to_string(),
        backorder: false,
    }
}

fn form_from_args(args: &[String]) -> anyhow::Result<PolicyForm> {
    if args.len() != 10 {
        anyhow::bail!("需要 10 個參數，收到 {} 個", args.len());
    }

    let backorder = PolicyForm::parse_backorder_flag(&args[9])?;

    Ok(PolicyForm {
        unit_cost: args[0].clone(),
        ordering_cost: args[1].clone(),
        penalty_cost: args[2].clone(),
        interest_rate_percent: args[3].clone(),
        lead_time_months: args[4].clone(),
        monthly_demand: args[5].clone(),
        monthly_std_dev: args[6].clone(),
        service_level: args[7].clone(),
        service_level_type: args[8].clone(),
        backorder,
    })
}
