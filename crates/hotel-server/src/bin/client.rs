//! Interactive command-line client for the reservation service

use std::io::{self, BufRead, Read, Write};
use std::net::TcpStream;

/// Room types offered by the server, with the rate shown in the menu
const ROOM_TYPES: [(&str, u32); 3] = [("single_bed", 50), ("double_bed", 100), ("suite", 200)];

fn create_request(method: &str, path: &str, body: Option<&str>) -> String {
    match body {
        None => format!("{method} {path} HTTP/1.1\r\nConnection: close\r\n\r\n"),
        Some(body) => format!(
            "{method} {path} HTTP/1.1\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    }
}

/// Send a raw HTTP request and print the server's answer.
fn send_request(addr: &str, request: &str) -> io::Result<()> {
    let mut stream = TcpStream::connect(addr)?;
    stream.write_all(request.as_bytes())?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;

    // Strip the headers; the payload is what the user cares about.
    let body = response
        .split_once("\r\n\r\n")
        .map_or(response.as_str(), |(_, body)| body);
    println!("Server response: {body}");
    Ok(())
}

fn prompt(stdin: &mut io::StdinLock, text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> io::Result<()> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("127.0.0.1:8080"));
    let mut stdin = io::stdin().lock();

    loop {
        println!("\nHotel Reservation Client");
        println!("1. Check available rooms");
        println!("2. Book a room");
        println!("3. Checkout room");
        println!("4. Exit");

        let choice = prompt(&mut stdin, "Enter your choice: ")?;
        let result = match choice.as_str() {
            "1" => send_request(&addr, &create_request("GET", "/availability", None)),
            "2" => {
                println!("\nChoose Room Type:");
                for (i, (name, rate)) in ROOM_TYPES.iter().enumerate() {
                    println!("{}. {name} - ${rate} per night", i + 1);
                }
                let room_choice = prompt(&mut stdin, "Enter your choice: ")?;
                let Some((room_type, rate)) = room_choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| ROOM_TYPES.get(i.wrapping_sub(1)))
                else {
                    println!("Invalid choice, try again.");
                    continue;
                };
                println!("\nSelected Room Type: {room_type} - Cost: ${rate} per night");

                let customer_name = prompt(&mut stdin, "Enter customer name: ")?;
                let checkin_date = prompt(&mut stdin, "Enter check-in date (YYYY-MM-DD): ")?;

                let body = format!("{customer_name},{room_type},{checkin_date}");
                send_request(&addr, &create_request("POST", "/book", Some(&body)))
            }
            "3" => {
                let room_number = prompt(&mut stdin, "Enter room number to checkout: ")?;
                let checkout_date = prompt(&mut stdin, "Enter checkout date (YYYY-MM-DD): ")?;

                let body = format!("{room_number},{checkout_date}");
                send_request(&addr, &create_request("POST", "/checkout", Some(&body)))
            }
            "4" => {
                println!("Exiting client.");
                return Ok(());
            }
            _ => {
                println!("Invalid choice, please try again.");
                continue;
            }
        };

        if let Err(err) = result {
            eprintln!("Request failed: {err}");
        }
    }
}
