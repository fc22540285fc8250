//! Complete login flow example
//!
//! This example demonstrates the full login flow:
//! 1. Resolve the current app version
//! 2. Sign in with phone number and password
//! 3. Finish with the SMS code when the server asks for one
//! 4. Read the balance
//!
//! Run with: cargo run --example login_flow -- <phone> <password>

use std::io::BufRead;

use paypay_sdk::{middleware::LoggingMiddleware, LoginResult, PayPay};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(phone), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: login_flow <phone> <password>");
        return Ok(());
    };

    let paypay = PayPay::builder()
        .with_middleware(LoggingMiddleware::new())
        .connect()
        .await?;
    println!("App version: {}", paypay.app_version());

    match paypay.login(&phone, &password).await? {
        LoginResult::Done(_) => println!("Login successful!"),
        LoginResult::OtpRequired(challenge) => {
            println!("Enter the SMS code sent to {}:", challenge.otp_prefix);
            let mut otp = String::new();
            std::io::stdin().lock().read_line(&mut otp)?;
            paypay
                .complete_otp(&challenge.otp_reference_id, otp.trim())
                .await?;
            println!("Login successful!");
        }
    }

    // Persist these to resume the session later
    println!("Client UUID: {}", paypay.client_uuid().as_str());
    println!("Device UUID: {}", paypay.device_uuid().as_str());

    match paypay.get_balance().await {
        Ok(balance) => println!("Balance: {} JPY", balance.balance),
        Err(e) => eprintln!("Balance error: {}", e),
    }

    Ok(())
}
