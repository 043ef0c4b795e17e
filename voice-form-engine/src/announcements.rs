//! Spoken prompts, field labels and interface messages in both languages.

use crate::language::Language;

/// Prompt spoken before listening for `field_name`; empty for unknown fields.
pub fn announce_field(field_name: &str, language: Language) -> &'static str {
    match language {
        Language::English => match field_name {
            "fullName" => "Please say your full name",
            "fatherName" => "Please say your father's name",
            "mobileNumber" => "Please say your mobile number",
            "email" => "Please say your email address",
            "dob" => "Please say your date of birth",
            "annualIncome" => "Please say your annual income in rupees",
            "address" => "Please say your complete address",
            "state" => "Please say your state name",
            "district" => "Please say your district name",
            "pincode" => "Please say your PIN code",
            _ => "",
        },
        Language::Hindi => match field_name {
            "fullName" => "कृपया अपना पूरा नाम बताएं",
            "fatherName" => "कृपया अपने पिता का नाम बताएं",
            "mobileNumber" => "कृपया अपना मोबाइल नंबर बताएं",
            "email" => "कृपया अपना ईमेल पता बताएं",
            "dob" => "कृपया अपनी जन्म तिथि बताएं",
            "annualIncome" => "कृपया अपनी वार्षिक आय रुपयों में बताएं",
            "address" => "कृपया अपना पूरा पता बताएं",
            "state" => "कृपया अपने राज्य का नाम बताएं",
            "district" => "कृपया अपने जिले का नाम बताएं",
            "pincode" => "कृपया अपना पिन कोड बताएं",
            _ => "",
        },
    }
}

/// Display label of a field.
pub fn field_label(field_name: &str, language: Language) -> Option<&'static str> {
    let label = match language {
        Language::English => match field_name {
            "fullName" => "Full Name",
            "fatherName" => "Father's Name",
            "mobileNumber" => "Mobile Number",
            "email" => "Email Address",
            "dob" => "Date of Birth",
            "annualIncome" => "Annual Income",
            "address" => "Complete Address",
            "state" => "State",
            "district" => "District",
            "pincode" => "PIN Code",
            _ => return None,
        },
        Language::Hindi => match field_name {
            "fullName" => "पूरा नाम",
            "fatherName" => "पिता का नाम",
            "mobileNumber" => "मोबाइल नंबर",
            "email" => "ईमेल पता",
            "dob" => "जन्म तिथि",
            "annualIncome" => "वार्षिक आय",
            "address" => "पूरा पता",
            "state" => "राज्य",
            "district" => "जिला",
            "pincode" => "पिन कोड",
            _ => return None,
        },
    };
    Some(label)
}

/// Read-back spoken after a value is stored.
pub fn confirmation(value: &str, language: Language) -> String {
    match language {
        Language::English => format!("I heard: {value}. Moving to next field."),
        Language::Hindi => format!("मैंने सुना: {value}। अगले फील्ड पर जा रहे हैं।"),
    }
}

/// Fixed interface messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    VoiceUnsupported,
    MicrophoneDenied,
    VoiceRetry,
    DraftSaved,
    SaveFailed,
    FormSubmitted,
    MissingRequired,
    GenericError,
}

pub fn localized(message: Message, language: Language) -> &'static str {
    match (message, language) {
        (Message::VoiceUnsupported, Language::English) => {
            "Voice input is not supported on this device. Please type your answer."
        }
        (Message::VoiceUnsupported, Language::Hindi) => {
            "इस डिवाइस पर आवाज इनपुट उपलब्ध नहीं है। कृपया अपना उत्तर टाइप करें।"
        }
        (Message::MicrophoneDenied, Language::English) => {
            "Microphone permission was denied. Please allow microphone access and try again."
        }
        (Message::MicrophoneDenied, Language::Hindi) => {
            "माइक्रोफ़ोन की अनुमति नहीं मिली। कृपया माइक्रोफ़ोन की अनुमति दें और फिर से प्रयास करें।"
        }
        (Message::VoiceRetry, Language::English) => "Sorry, I could not hear you. Please try again.",
        (Message::VoiceRetry, Language::Hindi) => "माफ़ कीजिए, मैं सुन नहीं पाया। कृपया फिर से बोलें।",
        (Message::DraftSaved, Language::English) => "Your form has been saved as draft",
        (Message::DraftSaved, Language::Hindi) => "आपका फॉर्म ड्राफ्ट के रूप में सेव हो गया है",
        (Message::SaveFailed, Language::English) => "Failed to save form",
        (Message::SaveFailed, Language::Hindi) => "फॉर्म सेव नहीं हो सका",
        (Message::FormSubmitted, Language::English) => "Your form has been submitted successfully",
        (Message::FormSubmitted, Language::Hindi) => "आपका फॉर्म सफलतापूर्वक जमा हो गया है",
        (Message::MissingRequired, Language::English) => "Please fill all required fields before submitting",
        (Message::MissingRequired, Language::Hindi) => "जमा करने से पहले कृपया सभी आवश्यक फील्ड भरें",
        (Message::GenericError, Language::English) => "Error",
        (Message::GenericError, Language::Hindi) => "त्रुटि",
    }
}
